//! Session events for rendering and UI collaborators

use furnish_core::{FurnitureTypeId, InstanceId, RoomId, Vec2};
use furnish_layout::LayoutFailure;

/// Something a collaborator may need to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    InstanceAdded {
        id: InstanceId,
        type_id: FurnitureTypeId,
    },
    InstanceMoved {
        id: InstanceId,
        position: Vec2,
        rotation: f32,
        /// Advisory collision flag for the new position
        colliding: bool,
    },
    /// The instance is gone; release any render-side resources
    InstanceRemoved { id: InstanceId },
    RoomChanged { room: RoomId },
    SelectionChanged {
        primary: Option<InstanceId>,
        selected: Vec<InstanceId>,
    },
    /// A recoverable, user-facing message
    Notice(String),
    LayoutFailed(LayoutFailure),
}

/// A simple event queue that the session pushes to and collaborators drain
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
