//! Gap-buffer text storage with cursor-relative editing.
//!
//! Live content occupies `storage[..gap_start]` and `storage[gap_end..]`;
//! the slots between them are unused capacity. The cursor is always
//! `gap_start`, so moving the cursor means moving the gap.

use crate::constants::DEFAULT_INITIAL_CAPACITY;
use std::fmt;
use std::ops::Range;

const GAP_FILL: char = '\0';

/// Mutable character buffer with the gap positioned at the cursor.
#[derive(Clone)]
pub struct GapBuffer {
    storage: Vec<char>,
    gap_start: usize,
    gap_end: usize,
    initial_capacity: usize,
    revision: u64,
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}

impl GapBuffer {
    /// Create an empty buffer with the default initial capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer whose gap spans `capacity` slots.
    ///
    /// A zero capacity is bumped to one so growth can always double.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: vec![GAP_FILL; capacity],
            gap_start: 0,
            gap_end: capacity,
            initial_capacity: capacity,
            revision: 0,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.insert_str(text);
        buffer
    }

    /// Logical content length in characters.
    pub fn len(&self) -> usize {
        self.storage.len() - self.gap_len()
    }

    /// Returns `true` when the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current cursor position as a logical index.
    pub fn cursor(&self) -> usize {
        self.gap_start
    }

    /// Total slot count, live content plus gap.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of unused slots currently forming the gap.
    pub fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Physical gap bounds as `gap_start..gap_end`.
    pub fn gap(&self) -> Range<usize> {
        self.gap_start..self.gap_end
    }

    /// Monotonic mutation counter used to key layout caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn physical(&self, logical: usize) -> usize {
        if logical < self.gap_start {
            logical
        } else {
            logical + self.gap_len()
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Returns the character at a logical index, if in range.
    pub fn char_at(&self, logical: usize) -> Option<char> {
        if logical >= self.len() {
            return None;
        }
        Some(self.storage[self.physical(logical)])
    }

    /// Iterate the logical content in order, skipping the gap.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.storage[..self.gap_start]
            .iter()
            .chain(self.storage[self.gap_end..].iter())
            .copied()
    }

    /// Double the capacity, shifting the right-hand segment to the new tail.
    fn grow(&mut self) {
        let old_capacity = self.storage.len();
        let new_capacity = old_capacity.saturating_mul(2).max(1);
        let added = new_capacity - old_capacity;
        self.storage.resize(new_capacity, GAP_FILL);
        self.storage
            .copy_within(self.gap_end..old_capacity, self.gap_end + added);
        self.gap_end += added;
        tracing::debug!(
            old_capacity,
            new_capacity,
            cursor = self.gap_start,
            "gap buffer grew"
        );
    }

    /// Write one character at the cursor and advance past it.
    pub fn insert(&mut self, ch: char) {
        if self.gap_start == self.gap_end {
            self.grow();
        }
        self.storage[self.gap_start] = ch;
        self.gap_start += 1;
        self.bump_revision();
    }

    /// Insert every character of `text` in order at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert(ch);
        }
    }

    /// Delete the character left of the cursor. No-op at the start.
    pub fn backspace(&mut self) {
        if self.gap_start == 0 {
            return;
        }
        self.gap_start -= 1;
        self.bump_revision();
    }

    /// Delete the character right of the cursor. No-op at the end.
    pub fn delete_forward(&mut self) {
        if self.gap_end == self.storage.len() {
            return;
        }
        self.gap_end += 1;
        self.bump_revision();
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if self.gap_start == 0 {
            return;
        }
        self.gap_start -= 1;
        self.gap_end -= 1;
        self.storage[self.gap_end] = self.storage[self.gap_start];
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if self.gap_end == self.storage.len() {
            return;
        }
        self.storage[self.gap_start] = self.storage[self.gap_end];
        self.gap_start += 1;
        self.gap_end += 1;
    }

    /// Step the cursor one character at a time until it reaches `logical`.
    ///
    /// Cost is O(distance). Targets past the end clamp to the end.
    pub fn move_to(&mut self, logical: usize) {
        let target = logical.min(self.len());
        while self.gap_start > target {
            self.move_left();
        }
        while self.gap_start < target {
            self.move_right();
        }
    }

    /// Relocate the gap to `logical` with a single bulk copy.
    ///
    /// Observably identical to [`GapBuffer::move_to`].
    pub fn jump_to(&mut self, logical: usize) {
        let target = logical.min(self.len());
        if target < self.gap_start {
            let moved = self.gap_start - target;
            self.storage
                .copy_within(target..self.gap_start, self.gap_end - moved);
            self.gap_start = target;
            self.gap_end -= moved;
        } else if target > self.gap_start {
            let moved = target - self.gap_start;
            self.storage
                .copy_within(self.gap_end..self.gap_end + moved, self.gap_start);
            self.gap_start = target;
            self.gap_end += moved;
        }
    }

    /// Discard the logical range `start..end`, leaving the cursor at `start`.
    ///
    /// No-op when `start >= end`. `end` is clamped to the content length.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        self.move_to(start);
        self.gap_end = (self.gap_end + (end - start)).min(self.storage.len());
        self.bump_revision();
    }

    /// Copy the logical range `start..end` out without mutating the buffer.
    pub fn range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        (start..end)
            .map(|logical| self.storage[self.physical(logical)])
            .collect()
    }

    /// Drop all content and restore the initial capacity.
    pub fn clear(&mut self) {
        let dropped = self.len();
        self.storage = vec![GAP_FILL; self.initial_capacity];
        self.gap_start = 0;
        self.gap_end = self.initial_capacity;
        self.bump_revision();
        tracing::debug!(dropped, "gap buffer cleared");
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            fmt::Write::write_char(f, ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapBuffer")
            .field("text", &self.to_string())
            .field("cursor", &self.gap_start)
            .field("capacity", &self.storage.len())
            .field("gap_len", &self.gap_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty_with_full_gap() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.gap(), 0..10);
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn insert_grows_geometrically_and_keeps_right_segment() {
        let mut buf = GapBuffer::with_capacity(4);
        buf.insert_str("abcd");
        buf.move_to(1);
        assert_eq!(buf.gap_len(), 0);
        buf.insert('X');
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.to_string(), "aXbcd");
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buf = GapBuffer::from_text("ab");
        buf.move_to(0);
        buf.backspace();
        assert_eq!(buf.to_string(), "ab");
        buf.move_to(2);
        buf.backspace();
        assert_eq!(buf.to_string(), "a");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn delete_forward_removes_right_neighbor() {
        let mut buf = GapBuffer::from_text("abc");
        buf.move_to(1);
        buf.delete_forward();
        assert_eq!(buf.to_string(), "ac");
        buf.move_to(2);
        buf.delete_forward();
        assert_eq!(buf.to_string(), "ac");
    }

    #[test]
    fn moves_stop_at_extremities() {
        let mut buf = GapBuffer::from_text("xy");
        buf.move_right();
        assert_eq!(buf.cursor(), 2);
        buf.move_left();
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.to_string(), "xy");
    }

    #[test]
    fn move_to_is_idempotent() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.move_to(4);
        let snapshot = buf.to_string();
        buf.move_to(4);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.to_string(), snapshot);
    }

    #[test]
    fn jump_to_matches_stepwise_moves() {
        let mut stepped = GapBuffer::from_text("the quick brown fox");
        let mut jumped = stepped.clone();
        for target in [3, 17, 0, 19, 8, 8, 25] {
            stepped.move_to(target);
            jumped.jump_to(target);
            assert_eq!(stepped.cursor(), jumped.cursor());
            assert_eq!(stepped.to_string(), jumped.to_string());
            stepped.insert('!');
            jumped.insert('!');
            assert_eq!(stepped.to_string(), jumped.to_string());
        }
    }

    #[test]
    fn delete_range_removes_exact_span() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.delete_range(2, 5);
        assert_eq!(buf.to_string(), "he world");
        assert_eq!(buf.cursor(), 2);
        let before = buf.revision();
        buf.delete_range(3, 3);
        buf.delete_range(6, 1);
        assert_eq!(buf.to_string(), "he world");
        assert_eq!(buf.revision(), before);
    }

    #[test]
    fn range_reads_across_gap() {
        let mut buf = GapBuffer::from_text("abcdef");
        buf.move_to(3);
        assert_eq!(buf.range(1, 5), "bcde");
        assert_eq!(buf.range(4, 2), "");
        assert_eq!(buf.range(4, 100), "ef");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn insert_str_is_readable_from_prior_cursor() {
        let mut buf = GapBuffer::from_text("ad");
        buf.move_to(1);
        let at = buf.cursor();
        buf.insert_str("bc");
        assert_eq!(buf.range(at, at + 2), "bc");
        assert_eq!(buf.to_string(), "abcd");
    }

    #[test]
    fn clear_restores_initial_capacity() {
        let mut buf = GapBuffer::with_capacity(2);
        buf.insert_str("growing past two");
        assert!(buf.capacity() > 2);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 2);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn hello_world_comma_insert() {
        let mut buf = GapBuffer::from_text("hello world");
        assert_eq!(buf.cursor(), 11);
        buf.move_to(5);
        buf.insert(',');
        assert_eq!(buf.to_string(), "hello, world");
        assert_eq!(buf.cursor(), 6);
    }
}
