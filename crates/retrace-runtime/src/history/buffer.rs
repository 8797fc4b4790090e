#![forbid(unsafe_code)]

//! Fixed-capacity history with a cursor.
//!
//! [`BoundedHistory`] keeps entries oldest-first in a `VecDeque` so eviction
//! from the front is O(1). The cursor addresses one entry and moves by
//! clamped single steps, the way a browser's back/forward buttons do.
//!
//! # Invariants
//!
//! 1. `len() <= capacity()` after every operation.
//! 2. `current_index()` is `None` iff the buffer is empty, and otherwise
//!    `< len()`.
//! 3. After `push(x)`, `current()` is `x` and the cursor sits on the newest
//!    entry.
//! 4. `previous()` at index 0 and `next()` at the newest index are no-ops.
//!
//! ```text
//! push(d) into capacity 3
//! ┌──────────────────────────────────┐
//! │ before: [a, b, c]   cursor = 1   │
//! │ after:  [b, c, d]   cursor = 2   │  <-- a evicted, cursor snaps to d
//! └──────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::fmt;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 15;

/// Fixed-capacity circular history with an internal cursor.
#[derive(Clone)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
    cursor: Option<usize>,
}

impl<T> fmt::Debug for BoundedHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedHistory")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<T> Default for BoundedHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> BoundedHistory<T> {
    /// Create an empty history. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: None,
        }
    }

    /// Build a fresh history by pushing every element of `entries` in order,
    /// then moving the cursor to `cursor`.
    ///
    /// Pushing (rather than collecting) means capacity trimming behaves
    /// exactly as it does for steady-state pushes. An out-of-range or `None`
    /// cursor is rejected like [`set_cursor`](Self::set_cursor) rejects it,
    /// leaving the cursor on the newest entry.
    #[must_use]
    pub fn rebuild_from(
        entries: impl IntoIterator<Item = T>,
        cursor: Option<usize>,
        capacity: usize,
    ) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            history.push(entry);
        }
        if let Some(index) = cursor {
            history.set_cursor(index);
        }
        history
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Append `item`, evicting the oldest entry when full, and move the
    /// cursor onto it.
    pub fn push(&mut self, item: T) {
        self.entries.push_back(item);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len().checked_sub(1);
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Step the cursor one entry older (clamped at 0) and return the entry
    /// now under it.
    pub fn previous(&mut self) -> Option<&T> {
        let index = self.cursor?.saturating_sub(1);
        self.cursor = Some(index);
        self.entries.get(index)
    }

    /// Step the cursor one entry newer (clamped at the newest) and return the
    /// entry now under it.
    pub fn next(&mut self) -> Option<&T> {
        let newest = self.entries.len().checked_sub(1)?;
        let index = self.cursor?.saturating_add(1).min(newest);
        self.cursor = Some(index);
        self.entries.get(index)
    }

    /// The most recently pushed entry, regardless of the cursor.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Move the cursor to `index`.
    ///
    /// Out-of-range indices (every index, on an empty buffer) are rejected:
    /// nothing changes and `false` is returned.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.cursor = Some(index);
        true
    }

    /// Move the cursor back onto the newest entry and return its index.
    pub fn reset_cursor(&mut self) -> Option<usize> {
        self.cursor = self.entries.len().checked_sub(1);
        self.cursor
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Cursor position, or `None` when empty.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor position with `-1` standing for "empty".
    #[must_use]
    pub fn current_index_signed(&self) -> isize {
        self.cursor.map_or(-1, |i| i as isize)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry at `index` (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Iterate entries oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Entries oldest-first, cloned out.
    #[must_use]
    pub fn to_ordered_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.iter().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(items: &[char]) -> BoundedHistory<char> {
        let mut h = BoundedHistory::default();
        for c in items {
            h.push(*c);
        }
        h
    }

    #[test]
    fn new_is_empty() {
        let h: BoundedHistory<u8> = BoundedHistory::default();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), DEFAULT_CAPACITY);
        assert_eq!(h.current(), None);
        assert_eq!(h.last(), None);
        assert_eq!(h.current_index(), None);
        assert_eq!(h.current_index_signed(), -1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut h = BoundedHistory::new(0);
        h.push(1);
        h.push(2);
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.to_ordered_vec(), vec![2]);
        assert_eq!(h.current(), Some(&2));
    }

    #[test]
    fn push_moves_cursor_to_newest() {
        let mut h = filled(&['a', 'b', 'c']);
        h.previous();
        h.previous();
        assert_eq!(h.current(), Some(&'a'));

        h.push('d');
        assert_eq!(h.current(), Some(&'d'));
        assert_eq!(h.current_index(), Some(3));
    }

    #[test]
    fn push_keeps_entries_after_cursor() {
        // Unlike a browser, going back and pushing does not truncate.
        let mut h = filled(&['a', 'b', 'c']);
        h.previous();
        h.push('d');
        assert_eq!(h.to_ordered_vec(), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn eviction_drops_oldest() {
        let mut h = BoundedHistory::new(3);
        for i in 0..5 {
            h.push(i);
        }
        assert_eq!(h.to_ordered_vec(), vec![2, 3, 4]);
        assert_eq!(h.current(), Some(&4));
    }

    #[test]
    fn previous_clamps_at_oldest() {
        let mut h = filled(&['a', 'b']);
        assert_eq!(h.previous(), Some(&'a'));
        assert_eq!(h.previous(), Some(&'a'));
        assert_eq!(h.previous(), Some(&'a'));
        assert_eq!(h.current_index(), Some(0));
    }

    #[test]
    fn next_clamps_at_newest() {
        let mut h = filled(&['a', 'b']);
        h.previous();
        assert_eq!(h.next(), Some(&'b'));
        assert_eq!(h.next(), Some(&'b'));
        assert_eq!(h.current_index(), Some(1));
    }

    #[test]
    fn navigation_on_empty_returns_none() {
        let mut h: BoundedHistory<u8> = BoundedHistory::default();
        assert_eq!(h.previous(), None);
        assert_eq!(h.next(), None);
        assert_eq!(h.current_index(), None);
    }

    #[test]
    fn last_ignores_cursor() {
        let mut h = filled(&['a', 'b', 'c']);
        h.previous();
        h.previous();
        assert_eq!(h.last(), Some(&'c'));
    }

    #[test]
    fn set_cursor_rejects_out_of_range() {
        let mut h = filled(&['a', 'b', 'c']);
        assert!(h.set_cursor(0));
        assert_eq!(h.current(), Some(&'a'));
        assert!(!h.set_cursor(3));
        assert_eq!(h.current_index(), Some(0));

        let mut empty: BoundedHistory<char> = BoundedHistory::default();
        assert!(!empty.set_cursor(0));
        assert_eq!(empty.current_index(), None);
    }

    #[test]
    fn reset_cursor_returns_newest_index() {
        let mut h = filled(&['a', 'b', 'c']);
        h.set_cursor(0);
        assert_eq!(h.reset_cursor(), Some(2));
        assert_eq!(h.current(), Some(&'c'));

        let mut empty: BoundedHistory<char> = BoundedHistory::default();
        assert_eq!(empty.reset_cursor(), None);
    }

    #[test]
    fn clear_empties_and_resets_cursor() {
        let mut h = filled(&['a', 'b']);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.current_index(), None);
        assert_eq!(h.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn rebuild_applies_capacity_and_cursor() {
        let h = BoundedHistory::rebuild_from(vec![1, 2, 3, 4], Some(0), 3);
        assert_eq!(h.to_ordered_vec(), vec![2, 3, 4]);
        assert_eq!(h.current(), Some(&2));
    }

    #[test]
    fn rebuild_with_bad_cursor_keeps_newest() {
        let h = BoundedHistory::rebuild_from(vec![1, 2], Some(7), 5);
        assert_eq!(h.current_index(), Some(1));

        let h = BoundedHistory::rebuild_from(vec![1, 2], None, 5);
        assert_eq!(h.current_index(), Some(1));

        let h = BoundedHistory::<u8>::rebuild_from(Vec::new(), Some(0), 5);
        assert_eq!(h.current_index(), None);
    }

    #[test]
    fn debug_impl() {
        let h = filled(&['a']);
        let s = format!("{h:?}");
        assert!(s.contains("BoundedHistory"));
        assert!(s.contains("cursor"));
    }
}
