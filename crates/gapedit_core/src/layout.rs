//! Word wrapping and logical/display index mapping.
//!
//! Display space is the wrapped string: the logical text plus synthetic
//! `\n` breaks inserted where a word would overflow the wrap width. Display
//! indices are char offsets into that string.

use crate::gap_buffer::GapBuffer;
use crate::measure::TextMeasure;
use std::ops::Range;

/// A point in layout coordinates, origin at the top-left of the text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle in layout coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DisplayLine {
    /// Display index of the first char.
    start: usize,
    /// Char count excluding the trailing newline.
    len: usize,
    /// Byte span of the line inside `content`.
    bytes: Range<usize>,
}

/// Word-wrapped rendering of a buffer with the mapped cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    /// Wrapped text including synthetic line breaks.
    pub content: String,
    /// Cursor position in display space.
    pub cursor_index: usize,
    /// Logical offsets that begin a wrapped line, ascending.
    breaks: Vec<usize>,
    lines: Vec<DisplayLine>,
    logical_len: usize,
}

fn split_lines(content: &str) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut len = 0usize;
    let mut byte_start = 0usize;
    for (byte, ch) in content.char_indices() {
        if ch == '\n' {
            lines.push(DisplayLine {
                start,
                len,
                bytes: byte_start..byte,
            });
            start += len + 1;
            len = 0;
            byte_start = byte + 1;
        } else {
            len += 1;
        }
    }
    lines.push(DisplayLine {
        start,
        len,
        bytes: byte_start..content.len(),
    });
    lines
}

/// Wrap `text` to `max_width` and map `cursor` (logical) into display space.
///
/// Words are split at spaces; a space stays with the word before it. A word
/// that overflows the current line moves to a new line, and a word wider
/// than `max_width` on its own still gets its own line without being split.
/// Literal `\n` always ends the line. Pure in `(text, max_width, measure,
/// font_size)`.
pub fn wrap<M: TextMeasure + ?Sized>(
    text: &str,
    cursor: usize,
    max_width: f32,
    measure: &M,
    font_size: f32,
) -> DisplayState {
    let chars: Vec<char> = text.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut content = String::with_capacity(text.len());
    let mut line = String::new();
    let mut word = String::new();
    let mut word_start = 0usize;
    let mut breaks = Vec::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '\n' {
            line.push_str(&word);
            content.push_str(&line);
            content.push('\n');
            line.clear();
            word.clear();
            continue;
        }
        if word.is_empty() {
            word_start = idx;
        }
        word.push(ch);

        if ch == ' ' || idx == last {
            let candidate_width = {
                let mut candidate = String::with_capacity(line.len() + word.len());
                candidate.push_str(&line);
                candidate.push_str(&word);
                measure.text_width(&candidate, font_size)
            };
            if !line.is_empty() && candidate_width > max_width {
                content.push_str(&line);
                content.push('\n');
                breaks.push(word_start);
                line.clear();
            }
            line.push_str(&word);
            word.clear();
        }
    }
    content.push_str(&line);
    content.push_str(&word);

    let mut state = DisplayState {
        lines: split_lines(&content),
        content,
        cursor_index: 0,
        breaks,
        logical_len: chars.len(),
    };
    state.set_cursor(cursor);
    state
}

impl DisplayState {
    /// Re-map a logical cursor without re-wrapping.
    pub fn set_cursor(&mut self, logical: usize) {
        self.cursor_index = self.logical_to_display(logical);
    }

    /// Number of display lines, at least one.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of a display line without its trailing newline.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines
            .get(line)
            .map(|entry| &self.content[entry.bytes.clone()])
    }

    /// Logical offsets where a synthetic break was inserted.
    pub fn synthetic_breaks(&self) -> &[usize] {
        &self.breaks
    }

    /// Length of the wrapped string in chars.
    pub fn display_len(&self) -> usize {
        self.logical_len + self.breaks.len()
    }

    /// Map a logical index into display space.
    ///
    /// An index that starts a wrapped line lands after the synthetic break.
    pub fn logical_to_display(&self, logical: usize) -> usize {
        let logical = logical.min(self.logical_len);
        logical + self.breaks.partition_point(|&start| start <= logical)
    }

    /// Map a display index back to a logical index.
    ///
    /// A synthetic break maps to the logical start of the line it opens.
    pub fn display_to_logical(&self, display: usize) -> usize {
        let display = display.min(self.display_len());
        let preceding = self
            .breaks
            .iter()
            .enumerate()
            .take_while(|(nth, start)| **start + *nth < display)
            .count();
        (display - preceding).min(self.logical_len)
    }

    /// Display line containing `display`, with the column inside it.
    fn line_and_column(&self, display: usize) -> (usize, usize) {
        let line = self
            .lines
            .partition_point(|entry| entry.start <= display)
            .saturating_sub(1);
        let entry = &self.lines[line];
        (line, display.saturating_sub(entry.start).min(entry.len))
    }

    fn prefix_width<M: TextMeasure + ?Sized>(
        &self,
        line: usize,
        column: usize,
        measure: &M,
        font_size: f32,
    ) -> f32 {
        let Some(text) = self.line(line) else {
            return 0.0;
        };
        let end = text
            .char_indices()
            .nth(column)
            .map(|(byte, _)| byte)
            .unwrap_or(text.len());
        measure.text_width(&text[..end], font_size)
    }

    /// Top-left position of the char at `display`.
    ///
    /// A newline (or the end of text) sits just after the last char of its
    /// line.
    pub fn char_position<M: TextMeasure + ?Sized>(
        &self,
        display: usize,
        measure: &M,
        font_size: f32,
    ) -> Point {
        let display = display.min(self.display_len());
        let (line, column) = self.line_and_column(display);
        Point {
            x: self.prefix_width(line, column, measure, font_size),
            y: line as f32 * measure.line_spacing(font_size),
        }
    }

    fn closest_on_line<M: TextMeasure + ?Sized>(
        &self,
        line: usize,
        x: f32,
        measure: &M,
        font_size: f32,
    ) -> usize {
        let entry = &self.lines[line];
        let mut best = entry.start;
        let mut best_distance = f32::MAX;
        for column in 0..=entry.len {
            let distance = (self.prefix_width(line, column, measure, font_size) - x).abs();
            if distance < best_distance {
                best_distance = distance;
                best = entry.start + column;
            }
        }
        best
    }

    /// Display index closest to `point`, if it falls on a line.
    pub fn hit_test<M: TextMeasure + ?Sized>(
        &self,
        point: Point,
        measure: &M,
        font_size: f32,
    ) -> Option<usize> {
        let spacing = measure.line_spacing(font_size);
        if point.y < 0.0 || spacing <= 0.0 {
            return None;
        }
        let line = (point.y / spacing).floor() as usize;
        if line >= self.lines.len() {
            return None;
        }
        Some(self.closest_on_line(line, point.x, measure, font_size))
    }

    /// Display index one line above or below the cursor, nearest its x.
    ///
    /// Returns `None` on the first line moving up or the last moving down.
    pub fn vertical_target<M: TextMeasure + ?Sized>(
        &self,
        down: bool,
        measure: &M,
        font_size: f32,
    ) -> Option<usize> {
        let (line, column) = self.line_and_column(self.cursor_index);
        let target = if down {
            line.checked_add(1).filter(|next| *next < self.lines.len())?
        } else {
            line.checked_sub(1)?
        };
        let x = self.prefix_width(line, column, measure, font_size);
        Some(self.closest_on_line(target, x, measure, font_size))
    }

    /// Highlight rectangles for the logical range, merged per line.
    ///
    /// Characters with no visible advance, such as newlines, get
    /// `fallback_width`.
    pub fn selection_rects<M: TextMeasure + ?Sized>(
        &self,
        range: Range<usize>,
        measure: &M,
        font_size: f32,
        fallback_width: f32,
    ) -> Vec<Rect> {
        let height = measure.line_spacing(font_size);
        let end = range.end.min(self.logical_len);
        let mut rects: Vec<Rect> = Vec::new();
        for logical in range.start..end {
            let display = self.logical_to_display(logical);
            let here = self.char_position(display, measure, font_size);
            let next = self.char_position(display + 1, measure, font_size);
            let mut width = next.x - here.x;
            if next.y != here.y || width <= 0.0 {
                width = fallback_width;
            }
            match rects.last_mut() {
                Some(last) if last.y == here.y && (last.x + last.width - here.x).abs() < 0.01 => {
                    last.width += width;
                }
                _ => rects.push(Rect {
                    x: here.x,
                    y: here.y,
                    width,
                    height,
                }),
            }
        }
        rects
    }
}

/// Cached wrap keyed by buffer revision, wrap width and font size.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
    revision: u64,
    wrap_width_bits: u32,
    font_size_bits: u32,
    state: Option<DisplayState>,
}

impl LayoutCache {
    /// Returns `true` when cache keys no longer match the inputs.
    pub fn needs_rebuild(&self, revision: u64, wrap_width: f32, font_size: f32) -> bool {
        self.state.is_none()
            || self.revision != revision
            || self.wrap_width_bits != wrap_width.to_bits()
            || self.font_size_bits != font_size.to_bits()
    }

    /// Drop the cached layout, e.g. after swapping the measurer.
    pub fn invalidate(&mut self) {
        self.state = None;
    }

    /// Wrap the buffer, reusing the previous result when keys match.
    ///
    /// The cursor mapping is refreshed on every call since cursor moves do
    /// not change the revision.
    pub fn layout<M: TextMeasure + ?Sized>(
        &mut self,
        buffer: &GapBuffer,
        wrap_width: f32,
        measure: &M,
        font_size: f32,
    ) -> &DisplayState {
        let stale = self.needs_rebuild(buffer.revision(), wrap_width, font_size);
        let state = match self.state.take() {
            Some(state) if !stale => state,
            _ => {
                let state = wrap(
                    &buffer.to_string(),
                    buffer.cursor(),
                    wrap_width,
                    measure,
                    font_size,
                );
                tracing::debug!(
                    revision = buffer.revision(),
                    wrap_width,
                    lines = state.line_count(),
                    "layout rebuilt"
                );
                self.revision = buffer.revision();
                self.wrap_width_bits = wrap_width.to_bits();
                self.font_size_bits = font_size.to_bits();
                state
            }
        };
        let state = self.state.insert(state);
        state.set_cursor(buffer.cursor());
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasure;

    // One column = 1px at font size 10 with ratio 0.1; spacing = 12px.
    fn unit() -> MonospaceMeasure {
        MonospaceMeasure::new(0.1)
    }

    fn wrap_cols(text: &str, cursor: usize, cols: f32) -> DisplayState {
        wrap(text, cursor, cols, &unit(), 10.0)
    }

    #[test]
    fn empty_text_has_empty_content() {
        let state = wrap_cols("", 0, 10.0);
        assert_eq!(state.content, "");
        assert_eq!(state.cursor_index, 0);
        assert_eq!(state.line_count(), 1);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let state = wrap_cols("hello big world", 0, 10.0);
        assert_eq!(state.content, "hello big \nworld");
        assert_eq!(state.synthetic_breaks(), &[10]);
        assert_eq!(state.line(0), Some("hello big "));
        assert_eq!(state.line(1), Some("world"));
    }

    #[test]
    fn explicit_newline_always_breaks() {
        let state = wrap_cols("ab\ncd", 5, 100.0);
        assert_eq!(state.content, "ab\ncd");
        assert!(state.synthetic_breaks().is_empty());
        assert_eq!(state.cursor_index, 5);
    }

    #[test]
    fn overlong_word_gets_its_own_line_unsplit() {
        let state = wrap_cols("a abcdefghijkl b", 0, 5.0);
        assert_eq!(state.content, "a \nabcdefghijkl \nb");
        let state = wrap_cols("abcdefghijkl", 0, 5.0);
        assert_eq!(state.content, "abcdefghijkl");
    }

    #[test]
    fn removing_synthetic_breaks_restores_text() {
        let text = "the quick brown fox jumps over the lazy dog";
        let state = wrap_cols(text, 0, 12.0);
        let mut rebuilt: Vec<char> = state.content.chars().collect();
        for (nth, start) in state.synthetic_breaks().iter().enumerate().rev() {
            assert_eq!(rebuilt.remove(start + nth), '\n');
        }
        assert_eq!(rebuilt.into_iter().collect::<String>(), text);
    }

    #[test]
    fn cursor_maps_across_breaks() {
        let text = "hello big world";
        for cursor in 0..=text.len() {
            let state = wrap_cols(text, cursor, 10.0);
            let expected = if cursor >= 10 { cursor + 1 } else { cursor };
            assert_eq!(state.cursor_index, expected, "cursor {}", cursor);
            assert_eq!(state.display_to_logical(state.cursor_index), cursor);
        }
    }

    #[test]
    fn synthetic_break_maps_to_next_line_start() {
        let state = wrap_cols("hello big world", 0, 10.0);
        assert_eq!(state.display_to_logical(10), 10);
        assert_eq!(state.display_to_logical(11), 10);
        assert_eq!(state.display_to_logical(16), 15);
        assert_eq!(state.display_to_logical(99), 15);
    }

    #[test]
    fn char_position_uses_prefix_width_and_spacing() {
        let state = wrap_cols("hello big world", 0, 10.0);
        let measure = unit();
        assert_eq!(state.char_position(0, &measure, 10.0), Point { x: 0.0, y: 0.0 });
        let p = state.char_position(13, &measure, 10.0);
        assert_eq!(p.x, 2.0);
        assert!((p.y - 12.0).abs() < 1e-4);
        assert_eq!(state.char_position(10, &measure, 10.0).x, 10.0);
    }

    #[test]
    fn hit_test_picks_closest_column() {
        let state = wrap_cols("abc\ndefgh", 0, 100.0);
        let measure = unit();
        assert_eq!(
            state.hit_test(Point { x: 1.4, y: 2.0 }, &measure, 10.0),
            Some(1)
        );
        assert_eq!(
            state.hit_test(Point { x: 50.0, y: 2.0 }, &measure, 10.0),
            Some(3)
        );
        assert_eq!(
            state.hit_test(Point { x: 50.0, y: 13.0 }, &measure, 10.0),
            Some(9)
        );
        assert_eq!(state.hit_test(Point { x: 0.0, y: 30.0 }, &measure, 10.0), None);
        assert_eq!(state.hit_test(Point { x: 0.0, y: -1.0 }, &measure, 10.0), None);
    }

    #[test]
    fn vertical_target_keeps_column_and_stops_at_edges() {
        let measure = unit();
        let state = wrap_cols("abcdef\nxy\nlonger", 4, 100.0);
        let down = state.vertical_target(true, &measure, 10.0);
        assert_eq!(down, Some(9));
        assert_eq!(state.vertical_target(false, &measure, 10.0), None);

        let state = wrap_cols("abcdef\nxy\nlonger", 12, 100.0);
        assert_eq!(state.vertical_target(true, &measure, 10.0), None);
        assert_eq!(state.vertical_target(false, &measure, 10.0), Some(9));
    }

    #[test]
    fn selection_rects_merge_per_line_with_newline_fallback() {
        let measure = unit();
        let state = wrap_cols("ab\ncd", 0, 100.0);
        let rects = state.selection_rects(1..4, &measure, 10.0, 10.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].x, 1.0);
        assert_eq!(rects[0].width, 11.0);
        assert_eq!(rects[1].x, 0.0);
        assert_eq!(rects[1].width, 1.0);
        assert!(state.selection_rects(2..2, &measure, 10.0, 10.0).is_empty());
    }

    #[test]
    fn wrap_is_deterministic() {
        let text = "alpha beta gamma delta\nepsilon zeta";
        assert_eq!(wrap_cols(text, 7, 11.0), wrap_cols(text, 7, 11.0));
    }

    #[test]
    fn cache_reuses_wrap_until_revision_changes() {
        let measure = unit();
        let mut buffer = GapBuffer::from_text("hello big world");
        let mut cache = LayoutCache::default();
        assert!(cache.needs_rebuild(buffer.revision(), 10.0, 10.0));
        let content = cache.layout(&buffer, 10.0, &measure, 10.0).content.clone();
        assert_eq!(content, "hello big \nworld");
        assert!(!cache.needs_rebuild(buffer.revision(), 10.0, 10.0));

        buffer.move_to(2);
        assert!(!cache.needs_rebuild(buffer.revision(), 10.0, 10.0));
        assert_eq!(cache.layout(&buffer, 10.0, &measure, 10.0).cursor_index, 2);

        buffer.insert('!');
        assert!(cache.needs_rebuild(buffer.revision(), 10.0, 10.0));
        assert!(cache.needs_rebuild(buffer.revision(), 20.0, 10.0));
        let state = cache.layout(&buffer, 10.0, &measure, 10.0);
        assert_eq!(state.content, "he!llo \nbig world");
    }
}
