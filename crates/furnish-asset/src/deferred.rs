//! Placements waiting on a furniture type's payload

use furnish_core::{FurnitureTypeId, Placement};

/// How a deferred batch entered the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredOrigin {
    /// From a loaded plan or preset
    Restore,
    /// A fresh placement; records history when applied
    Fresh,
    /// A wizard batch that replaces the current layout when applied
    Replace,
}

/// Placements of one type that are instantiated together
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredBatch {
    pub type_id: FurnitureTypeId,
    pub placements: Vec<Placement>,
    pub origin: DeferredOrigin,
}

/// FIFO queue of deferred batches
#[derive(Debug, Default)]
pub struct DeferredQueue {
    batches: Vec<DeferredBatch>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: DeferredBatch) {
        if !batch.placements.is_empty() {
            self.batches.push(batch);
        }
    }

    /// Add one restored placement, merging with a queued restore of its type
    pub fn push_restore(&mut self, placement: Placement) {
        let type_id = placement.type_id;
        match self
            .batches
            .iter_mut()
            .rev()
            .find(|b| b.type_id == type_id && b.origin == DeferredOrigin::Restore)
        {
            Some(batch) => batch.placements.push(placement),
            None => self.batches.push(DeferredBatch {
                type_id,
                placements: vec![placement],
                origin: DeferredOrigin::Restore,
            }),
        }
    }

    /// Remove and return every batch waiting on `type_id`, in queue order
    pub fn take(&mut self, type_id: FurnitureTypeId) -> Vec<DeferredBatch> {
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.batches)
            .into_iter()
            .partition(|b| b.type_id == type_id);
        self.batches = waiting;
        ready
    }

    /// Drop everything waiting on `type_id`, returning the placement count
    pub fn discard(&mut self, type_id: FurnitureTypeId) -> usize {
        self.take(type_id).iter().map(|b| b.placements.len()).sum()
    }

    /// Drop the whole queue, returning the placement count
    pub fn clear(&mut self) -> usize {
        let dropped = self.len();
        self.batches.clear();
        dropped
    }

    /// Number of waiting placements
    pub fn len(&self) -> usize {
        self.batches.iter().map(|b| b.placements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
