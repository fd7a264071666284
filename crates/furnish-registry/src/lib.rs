//! Furnish Registry - Authoritative store of placed instances
//!
//! This crate wraps hecs with stable instance identifiers and a
//! deterministic insertion order. It holds no derived state (seat totals,
//! scores); callers recompute those after structural changes.

mod instance;
mod registry;

pub use instance::PlacedInstance;
pub use registry::Registry;
