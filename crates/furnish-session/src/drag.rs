//! Pointer drag state machine: `Idle -> Dragging -> Idle`

use furnish_core::{InstanceId, Vec2};

/// Drag state. Releasing always commits the last constrained position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        target: InstanceId,
        /// Pointer minus instance position at pointer-down
        offset: Vec2,
    },
}

impl DragState {
    pub fn begin(target: InstanceId, pointer: Vec2, position: Vec2) -> Self {
        DragState::Dragging {
            target,
            offset: pointer - position,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn target(&self) -> Option<InstanceId> {
        match self {
            DragState::Dragging { target, .. } => Some(*target),
            DragState::Idle => None,
        }
    }

    /// Where the dragged instance would go for a pointer position
    pub fn candidate(&self, pointer: Vec2) -> Option<Vec2> {
        match self {
            DragState::Dragging { offset, .. } => Some(pointer - *offset),
            DragState::Idle => None,
        }
    }
}
