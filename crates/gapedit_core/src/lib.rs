//! Text-editing engine: gap-buffer storage, word-wrap layout with
//! logical/display index mapping, selection ranges and incremental search.
//!
//! Everything here is single-threaded and synchronous. Hosts supply text
//! measurement, clipboard and file-picker collaborators through the traits
//! in [`measure`], [`clipboard`] and [`files`].

/// Clipboard collaborator seam.
pub mod clipboard;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Editor facade used by hosts.
pub mod editor;
/// Error types for persistence and configuration.
pub mod error;
/// Plain-text persistence.
pub mod files;
/// Gap-buffer storage engine.
pub mod gap_buffer;
/// User intents and pointer gestures.
pub mod input;
/// Word wrap and index mapping.
pub mod layout;
/// Text measurement seam.
pub mod measure;
/// Substring search.
pub mod search;
/// Selection anchor model.
pub mod selection;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::EditorError;
pub use files::FilePicker;
pub use gap_buffer::GapBuffer;
pub use input::{EditorCommand, PointerState, PressTarget, SearchKey};
pub use layout::{wrap, DisplayState, LayoutCache, Point, Rect};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use search::{SearchEngine, SearchStatus};
pub use selection::SelectionModel;
