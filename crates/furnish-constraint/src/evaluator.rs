//! Whole-registry validation

use crate::report::{ValidationReport, Violation};
use crate::solver::{collides, Solver};
use crate::types::Severity;
use furnish_core::{Catalog, RoomSpec};
use furnish_registry::{PlacedInstance, Registry};

/// Evaluates containment and collision rules against a registry
pub struct ContainmentEvaluator<'a> {
    registry: &'a Registry,
    catalog: &'a Catalog,
    room: &'a RoomSpec,
    solver: &'a Solver,
}

impl<'a> ContainmentEvaluator<'a> {
    /// Create a new evaluator
    pub fn new(
        registry: &'a Registry,
        catalog: &'a Catalog,
        room: &'a RoomSpec,
        solver: &'a Solver,
    ) -> Self {
        Self {
            registry,
            catalog,
            room,
            solver,
        }
    }

    /// Run every rule and return a validation report
    pub fn validate(&self, tolerance: f32) -> ValidationReport {
        let mut report = ValidationReport::new();
        let instances = self.registry.list();

        let mut floor = Vec::new();
        for instance in &instances {
            let kind = match self.catalog.furniture(instance.type_id) {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::debug!("validation skipped {}: {}", instance.id, e);
                    report.violations.push(Violation {
                        rule: "catalog".to_string(),
                        instance: instance.id,
                        other: None,
                        severity: Severity::Error,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if let Err(breach) =
                self.solver
                    .check_containment(kind, self.room, &instance.to_placement(), tolerance)
            {
                report.violations.push(Violation {
                    rule: "containment".to_string(),
                    instance: instance.id,
                    other: None,
                    severity: Severity::Error,
                    message: format!("{} ({}): {}", kind.name, instance.id, breach),
                });
            }

            if !instance.wall_item {
                floor.push((instance, kind.radius));
            }
        }

        self.check_collisions(&floor, &mut report);
        report
    }

    fn check_collisions(&self, floor: &[(&PlacedInstance, f32)], report: &mut ValidationReport) {
        let factor = self.solver.config().collision_factor;
        for (i, (a, ra)) in floor.iter().enumerate() {
            for (b, rb) in &floor[i + 1..] {
                if collides(a.position, *ra, b.position, *rb, factor) {
                    report.violations.push(Violation {
                        rule: "collision".to_string(),
                        instance: a.id,
                        other: Some(b.id),
                        severity: Severity::Warning,
                        message: format!(
                            "{} and {} are {:.2} apart (threshold {:.2})",
                            a.id,
                            b.id,
                            a.position.distance(&b.position),
                            (ra + rb) * factor
                        ),
                    });
                }
            }
        }
    }
}
