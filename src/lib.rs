//! Root crate facade for the gapedit editing engine.

pub use gapedit_core::{
    clipboard, config, constants, editor, error, files, gap_buffer, input, layout, measure,
    search, selection, wrap, Clipboard, DisplayState, Editor, EditorCommand, EditorConfig,
    EditorError, FilePicker, GapBuffer, LayoutCache, MemoryClipboard, MonospaceMeasure, Point,
    PointerState, PressTarget, Rect, SearchEngine, SearchKey, SearchStatus, SelectionModel,
    TextMeasure,
};
