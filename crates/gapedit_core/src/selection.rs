//! Anchor-based selection over the gap buffer's live cursor.

use crate::gap_buffer::GapBuffer;
use std::ops::Range;

/// Selection anchor paired with the buffer cursor.
///
/// The cursor itself is owned by [`GapBuffer`]; this only remembers where a
/// selection started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionModel {
    anchor: Option<usize>,
}

impl SelectionModel {
    /// Returns the anchor, if one is set.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Anchor at `cursor` when extending (keeping an existing anchor), or
    /// drop the anchor for an unmodified movement.
    ///
    /// Call before moving the cursor.
    pub fn begin_or_extend(&mut self, extend: bool, cursor: usize) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    /// Anchor unconditionally at `cursor`, as a text-area press does.
    pub fn anchor_at(&mut self, cursor: usize) {
        self.anchor = Some(cursor);
    }

    /// Clears active selection, keeping the cursor in place.
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// True when an anchor is set and differs from the cursor.
    pub fn is_active(&self, cursor: usize) -> bool {
        self.normalized_range(cursor).is_some()
    }

    /// Returns the half-open selected range, if any.
    pub fn normalized_range(&self, cursor: usize) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == cursor {
            return None;
        }
        Some(anchor.min(cursor)..anchor.max(cursor))
    }

    /// Selects the entire buffer, leaving the cursor at the end.
    pub fn select_all(&mut self, buffer: &mut GapBuffer) {
        self.anchor = Some(0);
        buffer.move_to(buffer.len());
    }

    /// Selected text, without mutating anything.
    pub fn selected_text(&self, buffer: &GapBuffer) -> Option<String> {
        let range = self.normalized_range(buffer.cursor())?;
        Some(buffer.range(range.start, range.end))
    }

    /// Delete the active selection ahead of a destructive edit.
    ///
    /// Leaves the cursor at the range start and clears the anchor. Returns
    /// the removed text, or `None` when nothing was selected (the anchor is
    /// still cleared).
    pub fn consume_for_edit(&mut self, buffer: &mut GapBuffer) -> Option<String> {
        let range = self.normalized_range(buffer.cursor());
        self.anchor = None;
        let range = range?;
        let removed = buffer.range(range.start, range.end);
        buffer.delete_range(range.start, range.end);
        Some(removed)
    }
}
