//! Accessibility report types

use furnish_core::{AcousticThresholds, InstanceId, Result, Wall};
use serde::Serialize;
use std::fmt;

/// Acoustic band of a room, from the room's `{warn, good}` thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcousticBand {
    /// Below `warn`
    Reverberant,
    /// From `warn` up to `good`
    Acceptable,
    /// `good` or better
    Good,
}

impl AcousticBand {
    pub fn classify(score: f32, thresholds: &AcousticThresholds) -> Self {
        if score < thresholds.warn {
            AcousticBand::Reverberant
        } else if score < thresholds.good {
            AcousticBand::Acceptable
        } else {
            AcousticBand::Good
        }
    }
}

impl fmt::Display for AcousticBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcousticBand::Reverberant => write!(f, "reverberant"),
            AcousticBand::Acceptable => write!(f, "acceptable"),
            AcousticBand::Good => write!(f, "good"),
        }
    }
}

/// A floor item whose edge sits too close to a wall to pass but not flush
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallIssue {
    pub instance: InstanceId,
    pub wall: Wall,
    /// Edge-to-wall distance in metres
    pub distance: f32,
}

/// Result of scoring one layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityReport {
    /// Smallest gap between two instances, ignoring deliberate groupings
    pub min_clearance: f32,
    /// Pairs that counted towards `min_clearance`
    pub qualifying_pairs: usize,
    pub wall_issues: Vec<WallIssue>,
    pub acoustic_score: f32,
    pub acoustic_band: AcousticBand,
    pub seat_total: u32,
    pub instance_count: usize,
}

impl AccessibilityReport {
    pub fn wall_issue_count(&self) -> usize {
        self.wall_issues.len()
    }

    /// Pretty-printed JSON for export
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} item(s), {} seat(s), min clearance {:.2} m, {} wall issue(s), acoustics {:.3} ({})",
            self.instance_count,
            self.seat_total,
            self.min_clearance,
            self.wall_issues.len(),
            self.acoustic_score,
            self.acoustic_band
        )
    }
}
