//! Furnish Constraint - Boundary and collision solving
//!
//! This crate clamps candidate placements into the room, snaps wall items to
//! the nearest wall, flags advisory collisions between floor items, and
//! validates whole registries into a report.

mod evaluator;
mod report;
mod solver;
mod types;

pub use evaluator::ContainmentEvaluator;
pub use report::{ValidationReport, Violation};
pub use solver::{collides, nearest_wall, obstacles_from, Solver};
pub use types::{Breach, Constrained, Obstacle, Severity};
