//! Linear undo/redo over region edits
//!
//! Each entry is an owned snapshot of the region and mask-region lists.
//! Recording after an undo discards the redo branch. The oldest entries
//! are dropped once the configured depth is exceeded.

use std::collections::VecDeque;

use crate::region::{MaskRegion, Region};

/// Default number of snapshots kept.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Snapshot of the edit lists at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub regions: Vec<Region>,
    pub mask_regions: Vec<MaskRegion>,
}

impl HistoryState {
    pub fn new(regions: &[Region], mask_regions: &[MaskRegion]) -> Self {
        Self {
            regions: regions.to_vec(),
            mask_regions: mask_regions.to_vec(),
        }
    }
}

/// Bounded linear history with a cursor.
///
/// The cursor is `None` only while the history is empty; otherwise it
/// indexes the state currently shown.
#[derive(Debug, Clone)]
pub struct EditHistory {
    states: VecDeque<HistoryState>,
    cursor: Option<usize>,
    max_len: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl EditHistory {
    /// Empty history keeping at most `max_len` states (at least one).
    pub fn new(max_len: usize) -> Self {
        Self {
            states: VecDeque::new(),
            cursor: None,
            max_len: max_len.max(1),
        }
    }

    /// Record a snapshot after the current position.
    ///
    /// Anything after the cursor is discarded first.
    pub fn record(&mut self, regions: &[Region], mask_regions: &[MaskRegion]) {
        if let Some(cursor) = self.cursor {
            self.states.truncate(cursor + 1);
        }

        self.states.push_back(HistoryState::new(regions, mask_regions));
        if self.states.len() > self.max_len {
            self.states.pop_front();
        }
        self.cursor = Some(self.states.len() - 1);
    }

    /// Step back, returning the state to restore.
    pub fn undo(&mut self) -> Option<&HistoryState> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.states.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward again, returning the state to restore.
    pub fn redo(&mut self) -> Option<&HistoryState> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.states.len() => {
                self.cursor = Some(cursor + 1);
                self.states.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.cursor = None;
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.states.len())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The state at the cursor.
    pub fn current(&self) -> Option<&HistoryState> {
        self.cursor.and_then(|c| self.states.get(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(n: i32) -> Vec<Region> {
        vec![Region::rectangle(0, 0, n, n)]
    }

    #[test]
    fn test_empty_history() {
        let mut history = EditHistory::default();
        assert_eq!(history.cursor(), None);
        assert!(history.is_empty());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = EditHistory::default();
        history.record(&[], &[]);
        history.record(&rect(1), &[]);
        history.record(&rect(2), &[]);

        assert_eq!(history.undo().unwrap().regions, rect(1));
        assert_eq!(history.undo().unwrap().regions, Vec::<Region>::new());
        assert!(history.undo().is_none());
        assert!(!history.can_undo());

        assert_eq!(history.redo().unwrap().regions, rect(1));
        assert_eq!(history.redo().unwrap().regions, rect(2));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_record_after_undo_drops_branch() {
        let mut history = EditHistory::default();
        history.record(&[], &[]);
        history.record(&rect(1), &[]);
        history.undo();
        history.record(&rect(3), &[]);

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().regions, rect(3));
    }

    #[test]
    fn test_bound_keeps_newest() {
        let mut history = EditHistory::new(3);
        for n in 0..5 {
            history.record(&rect(n), &[]);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.undo().unwrap().regions, rect(3));
        assert_eq!(history.undo().unwrap().regions, rect(2));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_minimum_depth_is_one() {
        let mut history = EditHistory::new(0);
        assert_eq!(history.max_len(), 1);
        history.record(&rect(1), &[]);
        history.record(&rect(2), &[]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().unwrap().regions, rect(2));
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut history = EditHistory::default();
        let mut live = rect(1);
        history.record(&live, &[]);
        live.push(Region::ellipse(0, 0, 4, 4));
        assert_eq!(history.current().unwrap().regions, rect(1));
    }

    #[test]
    fn test_clear() {
        let mut history = EditHistory::default();
        history.record(&[], &[]);
        history.clear();
        assert_eq!(history.cursor(), None);
        assert_eq!(history.len(), 0);
    }
}
