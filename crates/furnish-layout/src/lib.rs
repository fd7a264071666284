//! Furnish Layout - Procedural batch placement
//!
//! Generates whole batches of placements for the lecture, exam, groups and
//! circle scenarios. A batch either fits the room completely or comes back
//! as a [`LayoutFailure`]; nothing is ever partially placed. Fixed presets
//! from the catalog are expanded here too.

mod failure;
mod generator;
mod preset;
mod request;

pub use failure::LayoutFailure;
pub use generator::LayoutGenerator;
pub use preset::expand_preset;
pub use request::LayoutRequest;
