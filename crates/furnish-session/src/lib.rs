//! Furnish Session - Interactive layout editing
//!
//! A [`Session`] owns everything one editing session needs: the catalog,
//! the active room, the registry, the undo history, selection and drag
//! state, asset readiness and the outgoing event queue. Every input event
//! is a synchronous method call on the session.

mod drag;
mod event;
mod history;
mod selection;
mod session;

pub use drag::DragState;
pub use event::{EventBus, SessionEvent};
pub use history::{History, UndoOutcome};
pub use selection::Selection;
pub use session::{LoadSummary, Session};
