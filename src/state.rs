//! The bounded navigation stack.
//!
//! [`NavigationStack`] is plain storage: an ordered list of entries with the
//! bottom at index 0 and the current entry on top. It knows nothing about
//! routes, middleware or subscribers; the [`Router`](crate::Router) drives
//! it and decides when to trim.

use crate::entry::RouteEntry;

/// Maximum number of entries kept in history.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Navigation history, oldest first.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: Vec<RouteEntry>,
    max_depth: usize,
}

impl NavigationStack {
    /// Create an empty stack bounded by [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create an empty stack with a custom bound (at least 1).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// The bound enforced by [`trim`](Self::trim).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The current (top) entry.
    pub fn top(&self) -> Option<&RouteEntry> {
        self.entries.last()
    }

    /// Return `true` if `entry` equals the top by value.
    pub fn is_top(&self, entry: &RouteEntry) -> bool {
        self.top() == Some(entry)
    }

    /// Append an entry on top.
    pub fn push(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the top entry.
    pub fn pop(&mut self) -> Option<RouteEntry> {
        self.entries.pop()
    }

    /// Overwrite the top slot, or append when the stack is empty.
    ///
    /// Returns the entry that was replaced.
    pub fn replace_top(&mut self, entry: RouteEntry) -> Option<RouteEntry> {
        match self.entries.last_mut() {
            Some(top) => Some(std::mem::replace(top, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Drop entries from the bottom until the bound holds.
    ///
    /// Returns how many entries were evicted.
    pub fn trim(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.max_depth);
        if excess > 0 {
            self.entries.drain(..excess);
        }
        excess
    }

    /// Look below the top without mutating.
    ///
    /// `offset` counts down from the top and must be `<= 0`; `0` is read as
    /// `-1`, so `peek(0)` and `peek(-1)` both return the entry just below the
    /// top. Returns `None` for an empty stack, a positive offset, or an
    /// offset reaching past the bottom.
    pub fn peek(&self, offset: isize) -> Option<&RouteEntry> {
        if offset > 0 || self.entries.is_empty() {
            return None;
        }
        let offset = if offset == 0 { -1 } else { offset };
        let index = self.entries.len() as isize - 1 + offset;
        if index < 0 {
            return None;
        }
        self.entries.get(index as usize)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from bottom to top.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(ids: &[&str]) -> NavigationStack {
        let mut stack = NavigationStack::new();
        for id in ids {
            stack.push(RouteEntry::new(id));
        }
        stack
    }

    #[test]
    fn test_push_pop() {
        let mut stack = stack_of(&["a", "b"]);
        assert_eq!(stack.top(), Some(&RouteEntry::new("b")));
        assert_eq!(stack.pop(), Some(RouteEntry::new("b")));
        assert_eq!(stack.pop(), Some(RouteEntry::new("a")));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_replace_top() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.replace_top(RouteEntry::new("a")), None);
        assert_eq!(stack.len(), 1);

        assert_eq!(
            stack.replace_top(RouteEntry::new("b")),
            Some(RouteEntry::new("a"))
        );
        assert_eq!(stack.len(), 1);
        assert!(stack.is_top(&RouteEntry::new("b")));
    }

    #[test]
    fn test_trim_drops_oldest() {
        let mut stack = NavigationStack::with_max_depth(3);
        for id in ["1", "2", "3", "4", "5"] {
            stack.push(RouteEntry::new(id));
        }
        assert_eq!(stack.trim(), 2);
        let ids: Vec<_> = stack.iter().filter_map(RouteEntry::id).collect();
        assert_eq!(ids, vec!["3", "4", "5"]);
        assert_eq!(stack.trim(), 0);
    }

    #[test]
    fn test_peek() {
        let stack = stack_of(&["a", "b", "c"]);
        assert_eq!(stack.peek(0), Some(&RouteEntry::new("b")));
        assert_eq!(stack.peek(-1), Some(&RouteEntry::new("b")));
        assert_eq!(stack.peek(-2), Some(&RouteEntry::new("a")));
        assert_eq!(stack.peek(-3), None);
        assert_eq!(stack.peek(1), None);
        assert_eq!(NavigationStack::new().peek(0), None);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        assert_eq!(NavigationStack::with_max_depth(0).max_depth(), 1);
    }
}
