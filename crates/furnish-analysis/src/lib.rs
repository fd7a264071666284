//! Furnish Analysis - Read-only layout scoring
//!
//! Computes pairwise clearance, wall-passage issues and an acoustic
//! reverberation proxy over a registry. Scoring never mutates anything.

mod report;
mod scorer;

pub use report::{AccessibilityReport, AcousticBand, WallIssue};
pub use scorer::Scorer;
