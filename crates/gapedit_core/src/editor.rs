//! Editor facade tying buffer, selection, layout and search together.

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::constants::SELECTION_FALLBACK_WIDTH;
use crate::files::{self, FilePicker};
use crate::gap_buffer::GapBuffer;
use crate::input::{EditorCommand, PointerAction, PointerState, PressTarget, SearchKey};
use crate::layout::{DisplayState, LayoutCache, Point, Rect};
use crate::measure::{MonospaceMeasure, TextMeasure};
use crate::search::SearchEngine;
use crate::selection::SelectionModel;
use std::path::{Path, PathBuf};

/// Single-document editing session driven by the host UI thread.
#[derive(Debug)]
pub struct Editor<M = MonospaceMeasure> {
    buffer: GapBuffer,
    selection: SelectionModel,
    search: SearchEngine,
    search_open: bool,
    layout: LayoutCache,
    pointer: PointerState,
    measure: M,
    config: EditorConfig,
    document: Option<PathBuf>,
}

impl Editor<MonospaceMeasure> {
    /// Create an editor measuring text with the configured monospace advance.
    pub fn monospace(config: EditorConfig) -> Self {
        let measure = MonospaceMeasure::new(config.char_advance_ratio);
        Self::new(config, measure)
    }
}

impl<M: TextMeasure> Editor<M> {
    /// Create an empty editor.
    pub fn new(config: EditorConfig, measure: M) -> Self {
        Self {
            buffer: GapBuffer::with_capacity(config.initial_capacity),
            selection: SelectionModel::default(),
            search: SearchEngine::default(),
            search_open: false,
            layout: LayoutCache::default(),
            pointer: PointerState::default(),
            measure,
            config,
            document: None,
        }
    }

    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    /// Path of the last successfully loaded or saved document.
    pub fn document_path(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// Full logical content.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Cursor as a logical index.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Active selection range, if any.
    pub fn selection_range(&self) -> Option<std::ops::Range<usize>> {
        self.selection.normalized_range(self.buffer.cursor())
    }

    /// Change the wrap width after a viewport resize.
    pub fn set_wrap_width(&mut self, wrap_width: f32) {
        self.config.wrap_width = wrap_width;
    }

    /// Replace the measurer, e.g. after a font-size change.
    pub fn set_measure(&mut self, measure: M) {
        self.measure = measure;
        self.layout.invalidate();
    }

    fn relocate_cursor(&mut self, index: usize) {
        if self.config.direct_jump {
            self.buffer.jump_to(index);
        } else {
            self.buffer.move_to(index);
        }
    }

    /// Move the cursor to a logical index, extending or dropping the
    /// selection.
    pub fn move_cursor_to(&mut self, index: usize, select: bool) {
        self.selection.begin_or_extend(select, self.buffer.cursor());
        self.relocate_cursor(index.min(self.buffer.len()));
    }

    /// Apply one normalized command.
    pub fn apply(&mut self, command: EditorCommand, clipboard: &mut dyn Clipboard) {
        let revision = self.buffer.revision();
        let consumed = if command.consumes_selection() {
            if let (EditorCommand::Cut, Some(text)) =
                (&command, self.selection.selected_text(&self.buffer))
            {
                clipboard.set_text(&text);
            }
            self.selection.consume_for_edit(&mut self.buffer).is_some()
        } else {
            false
        };

        match command {
            EditorCommand::InsertChar(ch) => self.buffer.insert(ch),
            EditorCommand::InsertText(text) | EditorCommand::Paste(text) => {
                self.buffer.insert_str(&text)
            }
            EditorCommand::InsertNewline => self.buffer.insert('\n'),
            EditorCommand::InsertTab => self.buffer.insert('\t'),
            EditorCommand::Backspace if !consumed => self.buffer.backspace(),
            EditorCommand::DeleteForward if !consumed => self.buffer.delete_forward(),
            EditorCommand::Backspace | EditorCommand::DeleteForward | EditorCommand::Cut => {}
            EditorCommand::MoveLeft { select } => {
                self.selection.begin_or_extend(select, self.buffer.cursor());
                self.buffer.move_left();
            }
            EditorCommand::MoveRight { select } => {
                self.selection.begin_or_extend(select, self.buffer.cursor());
                self.buffer.move_right();
            }
            EditorCommand::MoveUp { select } => self.move_vertical(false, select),
            EditorCommand::MoveDown { select } => self.move_vertical(true, select),
            EditorCommand::MoveTo { index, select } => self.move_cursor_to(index, select),
            EditorCommand::SelectAll => self.selection.select_all(&mut self.buffer),
            EditorCommand::Deselect => self.selection.clear(),
            EditorCommand::Copy => {
                if let Some(text) = self.selection.selected_text(&self.buffer) {
                    clipboard.set_text(&text);
                }
            }
        }

        if self.search_open && self.buffer.revision() != revision {
            self.search.recompute(&self.buffer.to_string());
        }
    }

    /// Paste the clipboard contents at the cursor, replacing any selection.
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) {
        if let Some(text) = clipboard.text() {
            self.apply(EditorCommand::Paste(text), clipboard);
        }
    }

    /// Current wrapped layout with the cursor mapped into display space.
    pub fn display(&mut self) -> &DisplayState {
        self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            self.config.font_size,
        )
    }

    fn move_vertical(&mut self, down: bool, select: bool) {
        let font_size = self.config.font_size;
        let state = self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            font_size,
        );
        let Some(target) = state.vertical_target(down, &self.measure, font_size) else {
            return;
        };
        let logical = state.display_to_logical(target);
        self.move_cursor_to(logical, select);
    }

    /// Logical index under a point in text-area coordinates.
    pub fn index_at(&mut self, point: Point) -> Option<usize> {
        let font_size = self.config.font_size;
        let state = self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            font_size,
        );
        state
            .hit_test(point, &self.measure, font_size)
            .map(|display| state.display_to_logical(display))
    }

    /// Top-left of the cursor in text-area coordinates.
    pub fn cursor_position(&mut self) -> Point {
        let font_size = self.config.font_size;
        let state = self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            font_size,
        );
        state.char_position(state.cursor_index, &self.measure, font_size)
    }

    /// Highlight rectangles for the active selection.
    pub fn selection_rects(&mut self) -> Vec<Rect> {
        let Some(range) = self.selection_range() else {
            return Vec::new();
        };
        let font_size = self.config.font_size;
        let state = self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            font_size,
        );
        state.selection_rects(range, &self.measure, font_size, SELECTION_FALLBACK_WIDTH)
    }

    /// Highlight rectangles for the current search match while the prompt
    /// is open.
    pub fn match_rects(&mut self) -> Vec<Rect> {
        if !self.search_open {
            return Vec::new();
        }
        let Some(start) = self.search.current_match() else {
            return Vec::new();
        };
        let range = start..start + self.search.match_len();
        let font_size = self.config.font_size;
        let state = self.layout.layout(
            &self.buffer,
            self.config.wrap_width,
            &self.measure,
            font_size,
        );
        state.selection_rects(range, &self.measure, font_size, SELECTION_FALLBACK_WIDTH)
    }

    /// Pointer press; a text-area press moves the cursor and anchors there.
    pub fn pointer_press(&mut self, target: PressTarget) {
        let action = self.pointer.press(target);
        self.apply_pointer(action);
    }

    /// Pointer motion with the text index currently under the pointer.
    pub fn pointer_drag(&mut self, index: Option<usize>) {
        let action = self.pointer.drag(index);
        self.apply_pointer(action);
    }

    pub fn pointer_release(&mut self) {
        self.pointer.release();
    }

    fn apply_pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::PlaceAnchor(index) => {
                self.selection.clear();
                self.relocate_cursor(index.min(self.buffer.len()));
                self.selection.anchor_at(self.buffer.cursor());
            }
            PointerAction::ExtendTo(index) => self.move_cursor_to(index, true),
            PointerAction::None => {}
        }
    }

    pub fn is_search_open(&self) -> bool {
        self.search_open
    }

    /// Show the search prompt, rescanning the current text.
    pub fn open_search(&mut self) {
        self.search_open = true;
        self.search.recompute(&self.buffer.to_string());
    }

    pub fn close_search(&mut self) {
        self.search_open = false;
    }

    /// Replace the query and rescan.
    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(query);
        self.search.recompute(&self.buffer.to_string());
    }

    /// Handle a key while the search prompt is open.
    ///
    /// # Returns
    /// The match offset the cursor jumped to, if any.
    pub fn search_key(&mut self, key: SearchKey) -> Option<usize> {
        if !self.search_open {
            return None;
        }
        let target = match key {
            SearchKey::Escape => {
                self.close_search();
                return None;
            }
            SearchKey::Enter | SearchKey::F3 { shift: false } => self.search.next_match(),
            SearchKey::F3 { shift: true } => self.search.previous_match(),
            SearchKey::Backspace => {
                if !self.search.pop_char() {
                    return None;
                }
                self.search.recompute(&self.buffer.to_string());
                self.search.current_match()
            }
            SearchKey::Char(ch) => {
                if !self.search.push_char(ch) {
                    return None;
                }
                self.search.recompute(&self.buffer.to_string());
                self.search.current_match()
            }
        }?;
        self.move_cursor_to(target, false);
        Some(target)
    }

    fn after_document_swap(&mut self) {
        self.selection.clear();
        self.pointer.release();
        if self.search_open {
            self.search.recompute(&self.buffer.to_string());
        }
    }

    /// Load `path` into the buffer.
    ///
    /// # Returns
    /// The loaded path, or `None` when reading failed (content unchanged).
    pub fn load(&mut self, path: &Path) -> Option<PathBuf> {
        let loaded = files::load_or_log(&mut self.buffer, path)?;
        self.after_document_swap();
        self.document = Some(loaded.clone());
        Some(loaded)
    }

    /// Save the buffer to `path` (with the `.txt` suffix enforced).
    ///
    /// # Returns
    /// The written path, or `None` when writing failed.
    pub fn save(&mut self, path: &Path) -> Option<PathBuf> {
        let saved = files::save_or_log(&self.buffer, path)?;
        self.document = Some(saved.clone());
        Some(saved)
    }

    /// Ask the picker for a file and load it.
    pub fn load_with(&mut self, picker: &mut dyn FilePicker) -> Option<PathBuf> {
        let path = picker.pick_open()?;
        self.load(&path)
    }

    /// Ask the picker for a destination, suggesting the current file name.
    pub fn save_with(&mut self, picker: &mut dyn FilePicker) -> Option<PathBuf> {
        let suggested = self
            .document
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned());
        let path = picker.pick_save(suggested.as_deref())?;
        self.save(&path)
    }
}
