//! Procedural layout generator

use crate::failure::LayoutFailure;
use crate::request::LayoutRequest;
use furnish_constraint::Solver;
use furnish_core::{Catalog, FurnitureType, Placement, RoomSpec, Scenario, Vec2, WizardConfig};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Slack added before flooring so exact fits are not lost to rounding
const FIT_EPSILON: f32 = 1e-4;

fn fit_count(available: f32, pitch: f32) -> u32 {
    if pitch <= 0.0 || available <= 0.0 {
        return 0;
    }
    (available / pitch + FIT_EPSILON).floor() as u32
}

/// Generates whole wizard batches or fails atomically
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerator {
    config: WizardConfig,
    solver: Solver,
}

impl LayoutGenerator {
    pub fn new(config: WizardConfig, solver: Solver) -> Self {
        Self { config, solver }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// The furniture type a request will place
    pub fn resolve_type<'c>(
        &self,
        catalog: &'c Catalog,
        request: &LayoutRequest,
    ) -> Result<&'c FurnitureType, LayoutFailure> {
        let type_id = request
            .type_id
            .or_else(|| catalog.wizard_type(request.scenario))
            .ok_or(LayoutFailure::NoTypeForScenario(request.scenario))?;
        catalog
            .furniture(type_id)
            .map_err(|_| LayoutFailure::UnknownType(type_id))
    }

    /// Generate a complete, validated batch for `request` in `room`
    pub fn generate(
        &self,
        catalog: &Catalog,
        room: &RoomSpec,
        request: &LayoutRequest,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        let result = self.try_generate(catalog, room, request);
        if let Err(failure) = &result {
            tracing::debug!(
                "{} layout for {} in '{}' failed: {}",
                request.scenario,
                request.count,
                room.id,
                failure
            );
        }
        result
    }

    fn try_generate(
        &self,
        catalog: &Catalog,
        room: &RoomSpec,
        request: &LayoutRequest,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        if request.count == 0 {
            return Err(LayoutFailure::EmptyRequest);
        }
        let kind = self.resolve_type(catalog, request)?;

        let batch = match request.scenario {
            Scenario::Lecture => self.lecture(kind, room, request.count)?,
            Scenario::Exam => self.exam(kind, room, request.count)?,
            Scenario::Groups => self.groups(kind, room, request.count)?,
            Scenario::Circle => self.circle(kind, room, request.count)?,
        };

        self.validate_batch(kind, room, &batch)?;
        Ok(batch)
    }

    /// Centered rows, every desk turned to face the front
    fn lecture(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        count: u32,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        let width = kind.width();
        let depth = kind.depth();
        let usable_width = 2.0 * room.half_x - self.config.edge_margin;
        let usable_depth = 2.0 * room.half_z - self.config.edge_margin;

        let columns = fit_count(usable_width, width);
        if columns < 1 {
            return Err(LayoutFailure::NoColumns {
                width,
                usable: usable_width,
            });
        }
        let columns = columns.min(count);
        let rows = count.div_ceil(columns);

        let pitch = depth + self.config.row_gap;
        let required = rows as f32 * pitch - self.config.row_gap;
        if required > usable_depth + FIT_EPSILON {
            return Err(LayoutFailure::RowsExceedDepth {
                rows,
                required,
                usable: usable_depth,
            });
        }

        let x0 = -((columns - 1) as f32) * width / 2.0;
        let z0 = -((rows - 1) as f32) * pitch / 2.0;
        Ok((0..count)
            .map(|i| {
                let (col, row) = (i % columns, i / columns);
                Placement::new(
                    kind.id,
                    Vec2::new(x0 + col as f32 * width, z0 + row as f32 * pitch),
                    PI,
                )
            })
            .collect())
    }

    /// Spaced-out desks, rows starting at the front (north) wall
    fn exam(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        count: u32,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        let width = kind.width();
        let depth = kind.depth();
        let gap = self.config.exam_gap;
        let usable_width = 2.0 * room.half_x - self.config.edge_margin;
        let usable_depth = 2.0 * room.half_z - self.config.edge_margin;

        let pitch_x = width + gap;
        let pitch_z = depth + gap;
        let columns = fit_count(usable_width + gap, pitch_x);
        if columns < 1 {
            return Err(LayoutFailure::NoColumns {
                width,
                usable: usable_width,
            });
        }
        let columns = columns.min(count);
        let rows = count.div_ceil(columns);

        let inset = (self.config.edge_margin / 2.0 + depth / 2.0)
            .max(self.solver.config().margin_factor * kind.radius);
        let z0 = -(room.half_z - inset);

        // Far edge of the last row, measured from the front of the usable area
        let last_row = z0 + (rows - 1) as f32 * pitch_z;
        let required = last_row + depth / 2.0 + room.half_z - self.config.edge_margin / 2.0;
        if required > usable_depth + FIT_EPSILON {
            return Err(LayoutFailure::RowsExceedDepth {
                rows,
                required,
                usable: usable_depth,
            });
        }

        let x0 = -((columns - 1) as f32) * pitch_x / 2.0;
        Ok((0..count)
            .map(|i| {
                let (col, row) = (i % columns, i / columns);
                Placement::new(
                    kind.id,
                    Vec2::new(x0 + col as f32 * pitch_x, z0 + row as f32 * pitch_z),
                    PI,
                )
            })
            .collect())
    }

    /// Multi-seat clusters on a coarse grid, alternate cells turned
    fn groups(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        count: u32,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        let seats = kind.seats.max(1);
        let required = count.div_ceil(seats);

        let cell = 2.0 * kind.radius + self.config.cluster_gap;
        let grid_cols = fit_count(2.0 * room.half_x - self.config.edge_margin, cell);
        let grid_rows = fit_count(2.0 * room.half_z - self.config.edge_margin, cell);
        let capacity = grid_cols * grid_rows;
        if capacity < required {
            return Err(LayoutFailure::GridCapacity { capacity, required });
        }

        let columns = grid_cols.min(required);
        let rows = required.div_ceil(columns);
        let x0 = -((columns - 1) as f32) * cell / 2.0;
        let z0 = -((rows - 1) as f32) * cell / 2.0;

        Ok((0..required)
            .map(|i| {
                let (col, row) = (i % columns, i / columns);
                let rotation = if (col + row) % 2 == 1 { FRAC_PI_2 } else { 0.0 };
                Placement::new(
                    kind.id,
                    Vec2::new(x0 + col as f32 * cell, z0 + row as f32 * cell),
                    rotation,
                )
            })
            .collect())
    }

    /// Chairs evenly spaced on a circle, facing its centre
    fn circle(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        count: u32,
    ) -> Result<Vec<Placement>, LayoutFailure> {
        let radius = room.half_x.min(room.half_z) - self.config.circle_inset;
        if radius < self.config.circle_min_radius {
            return Err(LayoutFailure::RadiusTooSmall {
                radius,
                minimum: self.config.circle_min_radius,
            });
        }

        let step = TAU / count as f32;
        Ok((0..count)
            .map(|i| {
                let angle = i as f32 * step;
                Placement::new(
                    kind.id,
                    Vec2::new(radius * angle.sin(), radius * angle.cos()),
                    angle + PI,
                )
            })
            .collect())
    }

    /// Reject the whole batch if any placement breaks containment
    fn validate_batch(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        batch: &[Placement],
    ) -> Result<(), LayoutFailure> {
        for (index, placement) in batch.iter().enumerate() {
            self.solver
                .check_containment(kind, room, placement, self.config.tolerance)
                .map_err(|breach| LayoutFailure::OutOfBounds {
                    index,
                    reason: breach.to_string(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnish_core::{FurnitureTypeId, RoomId, WizardDefaults};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn standard(catalog: &Catalog) -> RoomSpec {
        catalog.room(&RoomId::from("standard")).unwrap().clone()
    }

    #[test]
    fn test_lecture_twelve_seats_standard_room() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        let batch = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Lecture, 12))
            .unwrap();
        assert_eq!(batch.len(), 12);

        let mut xs: Vec<f32> = batch.iter().map(|p| p.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.dedup_by(|a, b| (*a - *b).abs() < 1e-4);
        assert_eq!(xs.len(), 6);
        assert!((xs[0] + 3.5).abs() < 1e-4);
        assert!((xs[5] - 3.5).abs() < 1e-4);

        let mut zs: Vec<f32> = batch.iter().map(|p| p.z).collect();
        zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        zs.dedup_by(|a, b| (*a - *b).abs() < 1e-4);
        assert_eq!(zs.len(), 2);
        assert!((zs[0] + zs[1]).abs() < 1e-4);

        assert!(batch.iter().all(|p| (p.rotation - PI).abs() < 1e-6));
    }

    #[test]
    fn test_lecture_no_columns() {
        let catalog = catalog();
        let room = RoomSpec::new("booth", 0.6, 3.0);
        let generator = LayoutGenerator::default();

        let failure = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Lecture, 4))
            .unwrap_err();
        assert!(matches!(failure, LayoutFailure::NoColumns { .. }));
        assert!(failure.to_string().starts_with("room too small"));
    }

    #[test]
    fn test_lecture_rows_exceed_depth() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        // 6 per row at 1.4 m pitch: 7 rows need 9.2 m, 8.2 m usable
        let failure = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Lecture, 42))
            .unwrap_err();
        assert!(matches!(failure, LayoutFailure::RowsExceedDepth { rows: 7, .. }));
    }

    #[test]
    fn test_exam_anchored_at_front() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        let batch = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Exam, 8))
            .unwrap();
        assert_eq!(batch.len(), 8);

        // exam desk: depth 0.6, so the first row sits 0.5 from the north wall
        let front = batch.iter().map(|p| p.z).fold(f32::INFINITY, f32::min);
        assert!((front + 3.8).abs() < 1e-4);

        // 5 columns at 1.6 m pitch, centered
        let max_x = batch.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        assert!((max_x - 3.2).abs() < 1e-4);
    }

    #[test]
    fn test_exam_too_many_rows() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        assert!(generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Exam, 30))
            .is_ok());
        let failure = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Exam, 31))
            .unwrap_err();
        assert!(matches!(failure, LayoutFailure::RowsExceedDepth { rows: 7, .. }));
    }

    #[test]
    fn test_groups_rotation_parity() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        let batch = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Groups, 24))
            .unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch[0].rotation.abs() < 1e-6);
        assert!((batch[1].rotation - FRAC_PI_2).abs() < 1e-6);
        assert!(batch[2].rotation.abs() < 1e-6);
    }

    #[test]
    fn test_groups_capacity() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        // 3 × 3 grid of 8-seat clusters holds 72 seats
        assert!(generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Groups, 72))
            .is_ok());
        let failure = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Groups, 73))
            .unwrap_err();
        assert_eq!(
            failure,
            LayoutFailure::GridCapacity {
                capacity: 9,
                required: 10
            }
        );
    }

    #[test]
    fn test_circle_is_deterministic() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();
        let request = LayoutRequest::new(Scenario::Circle, 10);

        let first = generator.generate(&catalog, &room, &request).unwrap();
        let second = generator.generate(&catalog, &room, &request).unwrap();
        assert_eq!(first, second);

        // radius min(4.4, 4.3) - 1.0, first chair straight ahead facing back
        assert!(first[0].x.abs() < 1e-5);
        assert!((first[0].z - 3.3).abs() < 1e-5);
        assert!((first[0].rotation - PI).abs() < 1e-6);
        for p in &first {
            assert!((p.position().length() - 3.3).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_radius_too_small() {
        let catalog = catalog();
        let room = RoomSpec::new("small", 2.0, 2.0);
        let generator = LayoutGenerator::default();

        let failure = generator
            .generate(&catalog, &room, &LayoutRequest::new(Scenario::Circle, 6))
            .unwrap_err();
        assert!(matches!(failure, LayoutFailure::RadiusTooSmall { .. }));
    }

    #[test]
    fn test_empty_request_and_unknown_type() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();

        assert_eq!(
            generator
                .generate(&catalog, &room, &LayoutRequest::new(Scenario::Circle, 0))
                .unwrap_err(),
            LayoutFailure::EmptyRequest
        );
        let request = LayoutRequest::new(Scenario::Circle, 4).with_type(FurnitureTypeId(77));
        assert_eq!(
            generator.generate(&catalog, &room, &request).unwrap_err(),
            LayoutFailure::UnknownType(FurnitureTypeId(77))
        );
    }

    #[test]
    fn test_missing_wizard_default() {
        let catalog = Catalog::from_parts(
            vec![RoomSpec::new("plain", 4.0, 4.0)],
            vec![FurnitureType::new(1, "Chair", 0.3)],
            WizardDefaults::default(),
        )
        .unwrap();
        let room = catalog.room(&RoomId::from("plain")).unwrap();
        let generator = LayoutGenerator::default();

        assert_eq!(
            generator
                .generate(&catalog, room, &LayoutRequest::new(Scenario::Lecture, 4))
                .unwrap_err(),
            LayoutFailure::NoTypeForScenario(Scenario::Lecture)
        );
    }

    #[test]
    fn test_wall_type_fails_validation() {
        let catalog = catalog();
        let room = standard(&catalog);
        let generator = LayoutGenerator::default();
        let request = LayoutRequest::new(Scenario::Circle, 4).with_type(FurnitureTypeId(7));

        assert!(matches!(
            generator.generate(&catalog, &room, &request),
            Err(LayoutFailure::OutOfBounds { index: 0, .. })
        ));
    }
}
