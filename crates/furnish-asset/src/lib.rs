//! Furnish Asset - Payload readiness and deferred placement
//!
//! Model loading happens outside the engine. This crate records which
//! furniture types have a usable payload and holds placements that must
//! wait until their type becomes ready.

mod deferred;
mod tracker;

pub use deferred::{DeferredBatch, DeferredOrigin, DeferredQueue};
pub use tracker::{AssetState, AssetTracker};
