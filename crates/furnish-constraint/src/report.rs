//! Validation report types

use crate::types::Severity;
use furnish_core::InstanceId;
use serde::Serialize;

/// A single rule violation
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    /// `containment`, `collision` or `catalog`
    pub rule: String,
    pub instance: InstanceId,
    /// Second instance for pairwise rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<InstanceId>,
    pub severity: Severity,
    pub message: String,
}

/// A complete validation report
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the layout is valid (no errors; collisions are advisory)
    pub fn is_valid(&self) -> bool {
        !self
            .violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Count violations by severity
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let total = self.violations.len();
        if total == 0 {
            return "No violations found.".to_string();
        }

        format!(
            "{} violation(s): {} error(s), {} warning(s)",
            total,
            self.error_count(),
            self.warning_count(),
        )
    }
}
