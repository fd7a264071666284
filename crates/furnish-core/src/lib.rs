//! Furnish Core - Foundational types for the furnish layout engine
//!
//! This crate provides the types that all other furnish crates depend on:
//! - `InstanceId`, `FurnitureTypeId`, `RoomId` - Identifiers
//! - `Vec2`, `Wall`, `Placement` - Floor-plane spatial types
//! - `Catalog`, `RoomSpec`, `FurnitureType` - The validated furniture/room catalog
//! - `EngineConfig` - Layered solver, wizard and scoring configuration
//! - Error types and Result alias

mod catalog;
mod config;
mod error;
mod id;
mod types;

pub use catalog::{
    AcousticThresholds, Catalog, Footprint, FurnitureType, Preset, RoomSpec,
    Scenario, WizardDefaults,
};
pub use config::{EngineConfig, ScoringConfig, SolverConfig, WizardConfig};
pub use error::{FurnishError, Result};
pub use id::{FurnitureTypeId, InstanceId, RoomId};
pub use types::{normalize_angle, Placement, Vec2, Wall};
