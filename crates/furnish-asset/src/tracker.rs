//! Per-type payload readiness

use furnish_core::FurnitureTypeId;
use std::collections::BTreeMap;

/// Load state of one furniture type's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    /// Requested from the loader, not yet available
    Pending,
    /// Available for instantiation
    Ready,
    /// Permanently unavailable
    Failed(String),
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready)
    }
}

/// Tracks readiness per furniture type.
///
/// Types that were never marked pending are treated as ready, so an engine
/// without an external loader places everything immediately.
#[derive(Debug, Default)]
pub struct AssetTracker {
    states: BTreeMap<FurnitureTypeId, AssetState>,
}

impl AssetTracker {
    /// Create a tracker with every type ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker waiting on the given types
    pub fn pending<I>(types: I) -> Self
    where
        I: IntoIterator<Item = FurnitureTypeId>,
    {
        let mut tracker = Self::new();
        for type_id in types {
            tracker.expect(type_id);
        }
        tracker
    }

    /// Mark a type as requested. Ready and failed types are left alone.
    pub fn expect(&mut self, type_id: FurnitureTypeId) {
        self.states.entry(type_id).or_insert(AssetState::Pending);
    }

    /// Record that a type's payload arrived. Returns true if it was waiting.
    pub fn mark_ready(&mut self, type_id: FurnitureTypeId) -> bool {
        let previous = self.states.insert(type_id, AssetState::Ready);
        matches!(previous, Some(AssetState::Pending))
    }

    /// Record a permanent load failure
    pub fn mark_failed(&mut self, type_id: FurnitureTypeId, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("asset for furniture type {} failed: {}", type_id, reason);
        self.states.insert(type_id, AssetState::Failed(reason));
    }

    /// Current state of a type
    pub fn state(&self, type_id: FurnitureTypeId) -> AssetState {
        self.states
            .get(&type_id)
            .cloned()
            .unwrap_or(AssetState::Ready)
    }

    pub fn is_ready(&self, type_id: FurnitureTypeId) -> bool {
        self.state(type_id).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_types_are_ready() {
        let tracker = AssetTracker::new();
        assert!(tracker.is_ready(FurnitureTypeId(1)));
        assert_eq!(tracker.state(FurnitureTypeId(1)), AssetState::Ready);
    }

    #[test]
    fn test_pending_then_ready() {
        let mut tracker = AssetTracker::pending([FurnitureTypeId(1), FurnitureTypeId(3)]);
        assert_eq!(tracker.state(FurnitureTypeId(1)), AssetState::Pending);
        assert_eq!(tracker.state(FurnitureTypeId(3)), AssetState::Pending);

        assert!(tracker.mark_ready(FurnitureTypeId(1)));
        assert!(!tracker.mark_ready(FurnitureTypeId(1)));
        assert!(tracker.is_ready(FurnitureTypeId(1)));
        assert!(!tracker.is_ready(FurnitureTypeId(3)));
    }

    #[test]
    fn test_failed_is_sticky_for_expect() {
        let mut tracker = AssetTracker::pending([FurnitureTypeId(2)]);
        tracker.mark_failed(FurnitureTypeId(2), "404");
        tracker.expect(FurnitureTypeId(2));
        assert_eq!(
            tracker.state(FurnitureTypeId(2)),
            AssetState::Failed("404".to_string())
        );
    }
}
