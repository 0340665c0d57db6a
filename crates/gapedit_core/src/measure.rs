//! Text measurement seam supplied by the font/rendering collaborator.

use crate::constants::{DEFAULT_CHAR_ADVANCE_RATIO, LINE_SPACING_RATIO};
use unicode_width::UnicodeWidthChar;

/// Width and line-spacing queries for the active font.
///
/// Implementations must return the same width for the same `(text,
/// font_size)` pair within one frame; wrapping and vertical movement rely on
/// it.
pub trait TextMeasure {
    /// Rendered width of `text` at `font_size`, in pixels.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Distance between consecutive baselines at `font_size`.
    fn line_spacing(&self, font_size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        (**self).text_width(text, font_size)
    }

    fn line_spacing(&self, font_size: f32) -> f32 {
        (**self).line_spacing(font_size)
    }
}

/// Fixed-advance measurer counting terminal display columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    advance_ratio: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_ADVANCE_RATIO)
    }
}

impl MonospaceMeasure {
    /// Create a measurer whose column advance is `font_size * advance_ratio`.
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio: advance_ratio.max(f32::EPSILON),
        }
    }

    /// Advance of one display column at `font_size`.
    pub fn column_width(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let columns: usize = text
            .chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| ch.width().unwrap_or(0))
            .sum();
        columns as f32 * self.column_width(font_size)
    }

    fn line_spacing(&self, font_size: f32) -> f32 {
        font_size * LINE_SPACING_RATIO
    }
}
