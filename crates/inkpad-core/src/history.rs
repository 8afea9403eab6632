//! Linear undo/redo history of full element-sequence snapshots.
//!
//! The history is a plain vector of snapshots with a current index. A new
//! commit truncates any redo tail; undo and redo only move the index. There
//! is no structural diffing and no tree of branches.

use crate::element::Element;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    index: usize,
}

impl History {
    /// Create a history seeded with the initial element sequence.
    pub fn new(initial: Vec<Element>) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Record a new snapshot after a commit, discarding any redo tail.
    pub fn commit(&mut self, elements: Vec<Element>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(elements);
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns the now-active snapshot, or `None`
    /// if already at the oldest state.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. Returns the now-active snapshot, or `None`
    /// if already at the newest state.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// The currently active snapshot.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Clear to a single empty snapshot at index 0.
    pub fn reset(&mut self) {
        self.snapshots = vec![Vec::new()];
        self.index = 0;
    }
}
