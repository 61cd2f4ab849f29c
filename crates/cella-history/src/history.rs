//! Linear undo/redo history over full grid snapshots.
//!
//! Snapshots share storage with the grids they came from, so pushing a
//! state costs one reference-count bump. An optional capacity evicts the
//! oldest entries first.

use std::collections::VecDeque;

use cella_core::{GridState, HistoryError};

/// An ordered list of snapshots with a cursor.
///
/// Pushing truncates everything after the cursor (the redo branch)
/// before appending, then moves the cursor to the new entry.
#[derive(Clone, Debug, Default)]
pub struct StateHistory {
    states: VecDeque<GridState>,
    /// Index of the current entry. Meaningless while `states` is empty.
    cursor: usize,
    capacity: Option<usize>,
}

// Snapshots are immutable and may cross threads freely.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<StateHistory>();
};

impl StateHistory {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history retaining at most `capacity` snapshots.
    ///
    /// A capacity of zero is treated as one; the current state is always
    /// retained.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// The retention limit, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Discard the redo branch, append `state`, and make it current.
    ///
    /// Returns the oldest snapshot if the capacity forced an eviction.
    pub fn push(&mut self, state: GridState) -> Option<GridState> {
        if !self.states.is_empty() {
            self.states.truncate(self.cursor + 1);
        }
        self.states.push_back(state);
        self.cursor = self.states.len() - 1;

        match self.capacity {
            Some(cap) if self.states.len() > cap => {
                let evicted = self.states.pop_front();
                self.cursor -= 1;
                evicted
            }
            _ => None,
        }
    }

    /// Whether an earlier snapshot exists.
    pub fn can_undo(&self) -> bool {
        !self.states.is_empty() && self.cursor > 0
    }

    /// Whether a later snapshot exists.
    pub fn can_redo(&self) -> bool {
        !self.states.is_empty() && self.cursor + 1 < self.states.len()
    }

    /// Step back one entry and return it.
    pub fn undo(&mut self) -> Result<GridState, HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NoPreviousState);
        }
        self.cursor -= 1;
        Ok(self.states[self.cursor].clone())
    }

    /// Step forward one entry and return it.
    pub fn redo(&mut self) -> Result<GridState, HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NoNextState);
        }
        self.cursor += 1;
        Ok(self.states[self.cursor].clone())
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Result<GridState, HistoryError> {
        self.states
            .get(self.cursor)
            .cloned()
            .ok_or(HistoryError::EmptyHistory)
    }

    /// Drop every entry. The capacity is kept.
    pub fn clear(&mut self) {
        self.states.clear();
        self.cursor = 0;
    }

    /// Number of retained snapshots.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Whether nothing has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Cursor position, or `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.states.is_empty()).then_some(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cella_test_utils::{grid_with, single};
    use proptest::prelude::*;

    fn state(n: i32) -> GridState {
        grid_with(&[("a", single(n, 0, 0))])
    }

    #[test]
    fn empty_history() {
        let mut h = StateHistory::new();
        assert!(h.is_empty());
        assert_eq!(h.cursor(), None);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.current(), Err(HistoryError::EmptyHistory));
        assert_eq!(h.undo(), Err(HistoryError::NoPreviousState));
        assert_eq!(h.redo(), Err(HistoryError::NoNextState));
    }

    #[test]
    fn single_entry_cannot_navigate() {
        let mut h = StateHistory::new();
        h.push(state(0));
        assert_eq!(h.current().unwrap(), state(0));
        assert_eq!(h.undo(), Err(HistoryError::NoPreviousState));
        assert_eq!(h.redo(), Err(HistoryError::NoNextState));
    }

    #[test]
    fn undo_redo_walk() {
        let mut h = StateHistory::new();
        for i in 0..3 {
            h.push(state(i));
        }
        assert_eq!(h.undo().unwrap(), state(1));
        assert_eq!(h.undo().unwrap(), state(0));
        assert!(!h.can_undo());
        assert_eq!(h.redo().unwrap(), state(1));
        assert_eq!(h.current().unwrap(), state(1));
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn push_discards_redo_branch() {
        let mut h = StateHistory::new();
        for i in 0..3 {
            h.push(state(i));
        }
        h.undo().unwrap();
        h.undo().unwrap();
        h.push(state(9));
        assert_eq!(h.size(), 2);
        assert!(!h.can_redo());
        assert_eq!(h.undo().unwrap(), state(0));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut h = StateHistory::with_capacity(2);
        assert_eq!(h.push(state(0)), None);
        assert_eq!(h.push(state(1)), None);
        assert_eq!(h.push(state(2)), Some(state(0)));
        assert_eq!(h.size(), 2);
        assert_eq!(h.cursor(), Some(1));
        assert_eq!(h.undo().unwrap(), state(1));
        assert!(!h.can_undo());
    }

    #[test]
    fn zero_capacity_keeps_current() {
        let mut h = StateHistory::with_capacity(0);
        h.push(state(0));
        h.push(state(1));
        assert_eq!(h.capacity(), Some(1));
        assert_eq!(h.current().unwrap(), state(1));
    }

    #[test]
    fn clear_resets() {
        let mut h = StateHistory::with_capacity(4);
        h.push(state(0));
        h.push(state(1));
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), Some(4));
        assert_eq!(h.current(), Err(HistoryError::EmptyHistory));
    }

    proptest! {
        #[test]
        fn undo_all_then_redo_all(n in 1usize..20) {
            let mut h = StateHistory::new();
            let states: Vec<GridState> = (0..n as i32).map(state).collect();
            for s in &states {
                h.push(s.clone());
            }
            let last_hash = h.current().unwrap().stable_hash();
            for _ in 0..n - 1 {
                h.undo().unwrap();
            }
            prop_assert_eq!(h.current().unwrap(), states[0].clone());
            prop_assert!(!h.can_undo());
            for _ in 0..n - 1 {
                h.redo().unwrap();
            }
            prop_assert_eq!(h.current().unwrap().stable_hash(), last_hash);
            prop_assert!(!h.can_redo());
        }
    }
}
