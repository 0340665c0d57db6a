//! Case-insensitive substring search with wraparound match cycling.

use crate::constants::SEARCH_INPUT_RANGE;
use std::fmt;

/// Lower-case one char without changing char counts, so match offsets stay
/// aligned with the haystack.
fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Start offsets of every (possibly overlapping) occurrence of `needle`.
///
/// Offsets are char indices into `haystack`.
pub fn find_all(haystack: &str, needle: &str) -> Vec<usize> {
    let needle: Vec<char> = needle.chars().map(fold).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack: Vec<char> = haystack.chars().map(fold).collect();
    if needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle.as_slice())
        .map(|(offset, _)| offset)
        .collect()
}

/// Summary of the search session for a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query typed yet.
    Idle,
    /// Query typed but nothing matched.
    NoMatches,
    /// `current` is 1-based.
    Match { current: usize, total: usize },
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Type to search... (Esc to close)"),
            Self::NoMatches => f.write_str("No matches found"),
            Self::Match { current, total } => write!(
                f,
                "Match {} of {} (Enter/F3: next, Shift+F3: prev, Esc: close)",
                current, total
            ),
        }
    }
}

/// Query plus the matches found in the last scanned snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchEngine {
    query: String,
    matches: Vec<usize>,
    current: Option<usize>,
}

impl SearchEngine {
    /// The active query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query. Call [`SearchEngine::recompute`] afterwards.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a typed char. Only printable ASCII is accepted.
    ///
    /// # Returns
    /// `true` when the query changed.
    pub fn push_char(&mut self, ch: char) -> bool {
        if !SEARCH_INPUT_RANGE.contains(&u32::from(ch)) {
            return false;
        }
        self.query.push(ch);
        true
    }

    /// Remove the last query char.
    ///
    /// # Returns
    /// `true` when the query changed.
    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// Rescan `haystack` for the query, resetting to the first match.
    pub fn recompute(&mut self, haystack: &str) {
        self.matches = find_all(haystack, &self.query);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// All match offsets in ascending order.
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Length of a match in chars.
    pub fn match_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Index into [`SearchEngine::matches`] of the current match.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Offset of the current match.
    pub fn current_match(&self) -> Option<usize> {
        self.current.and_then(|idx| self.matches.get(idx).copied())
    }

    /// Advance to the next match, wrapping to the first.
    pub fn next_match(&mut self) -> Option<usize> {
        let count = self.matches.len();
        if count == 0 {
            return self.current_match();
        }
        self.current = Some(self.current.map_or(0, |idx| (idx + 1) % count));
        self.current_match()
    }

    /// Step back to the previous match, wrapping to the last.
    pub fn previous_match(&mut self) -> Option<usize> {
        let count = self.matches.len();
        if count == 0 {
            return self.current_match();
        }
        self.current = Some(self.current.map_or(count - 1, |idx| (idx + count - 1) % count));
        self.current_match()
    }

    /// Status summary for the current query and matches.
    pub fn status(&self) -> SearchStatus {
        if self.query.is_empty() {
            return SearchStatus::Idle;
        }
        match self.current {
            Some(idx) if !self.matches.is_empty() => SearchStatus::Match {
                current: idx + 1,
                total: self.matches.len(),
            },
            _ => SearchStatus::NoMatches,
        }
    }
}
