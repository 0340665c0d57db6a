//! Shared constants used across gapedit crates.

/// Capacity of a freshly created (or cleared) gap buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Default character size used for measurement, in points.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Default wrap width in pixels (600px window minus margins and scrollbar).
pub const DEFAULT_WRAP_WIDTH: f32 = 560.0;

/// Advance width of a single monospace column as a fraction of the font size.
pub const DEFAULT_CHAR_ADVANCE_RATIO: f32 = 0.6;

/// Line spacing as a multiple of the font size.
pub const LINE_SPACING_RATIO: f32 = 1.2;

/// Width used for selected characters that have no visible advance (newlines).
pub const SELECTION_FALLBACK_WIDTH: f32 = 10.0;

/// Extension enforced on saved documents.
pub const TEXT_FILE_EXTENSION: &str = ".txt";

/// Printable ASCII accepted by the search query input.
pub const SEARCH_INPUT_RANGE: std::ops::Range<u32> = 32..127;
