//! Bounded undo history of full registry snapshots

use furnish_core::Placement;

/// Result of an undo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The registry was rebuilt from the popped snapshot
    Restored { restored: usize, skipped: usize },
    /// Nothing to undo
    Empty,
}

/// Undo stack with bounded depth. The oldest snapshot is evicted first.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Vec<Placement>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(20)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Push a snapshot taken before a mutation
    pub fn push(&mut self, snapshot: Vec<Placement>) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
    }

    /// Pop the latest snapshot
    pub fn pop(&mut self) -> Option<Vec<Placement>> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
