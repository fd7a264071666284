//! Boundary and constraint solver

use crate::types::{Breach, Constrained, Obstacle};
use furnish_core::{
    normalize_angle, Catalog, FurnitureType, InstanceId, Placement, RoomSpec, SolverConfig, Vec2,
    Wall,
};
use furnish_registry::Registry;

/// Clamps candidate placements against the room and flags collisions
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Half-width of the legal interval for a floor item's centre on one axis
    pub fn floor_limit(&self, half: f32, radius: f32) -> f32 {
        (half - self.config.margin_factor * radius).max(0.0)
    }

    /// Half-length of the usable segment along a wall
    pub fn wall_limit(&self, half: f32) -> f32 {
        (half - self.config.wall_inset).max(0.0)
    }

    /// Clamp each axis independently into the floor rectangle
    pub fn clamp_floor(&self, kind: &FurnitureType, room: &RoomSpec, candidate: Vec2) -> Vec2 {
        let lx = self.floor_limit(room.half_x, kind.radius);
        let lz = self.floor_limit(room.half_z, kind.radius);
        Vec2::new(candidate.x.clamp(-lx, lx), candidate.z.clamp(-lz, lz))
    }

    /// Snap a candidate onto its nearest wall, returning position, yaw and wall
    pub fn snap_to_wall(&self, room: &RoomSpec, candidate: Vec2) -> (Vec2, f32, Wall) {
        let wall = nearest_wall(room, candidate);
        let position = if wall.is_x_wall() {
            let lz = self.wall_limit(room.half_z);
            Vec2::new(
                wall.sign() * (room.half_x - self.config.wall_offset),
                candidate.z.clamp(-lz, lz),
            )
        } else {
            let lx = self.wall_limit(room.half_x);
            Vec2::new(
                candidate.x.clamp(-lx, lx),
                wall.sign() * (room.half_z - self.config.wall_offset),
            )
        };
        (position, wall.yaw(), wall)
    }

    /// Round each axis to the configured grid step (no-op when disabled)
    pub fn snap_to_grid(&self, candidate: Vec2) -> Vec2 {
        match self.config.grid_step() {
            Some(step) => Vec2::new(
                (candidate.x / step).round() * step,
                (candidate.z / step).round() * step,
            ),
            None => candidate,
        }
    }

    /// Constrain a candidate position for `kind`.
    ///
    /// Boundary rules are always enforced. Collisions against `obstacles` are
    /// only reported through [`Constrained::colliding`]. `grid` enables the
    /// grid snap, which runs before clamping.
    pub fn constrain(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        candidate: Vec2,
        rotation: f32,
        obstacles: &[Obstacle],
        grid: bool,
    ) -> Constrained {
        let candidate = if grid {
            self.snap_to_grid(candidate)
        } else {
            candidate
        };

        if kind.wall_item {
            let (position, yaw, wall) = self.snap_to_wall(room, candidate);
            return Constrained {
                position,
                rotation: yaw,
                colliding: false,
                wall: Some(wall),
            };
        }

        let position = self.clamp_floor(kind, room, candidate);
        let colliding = obstacles.iter().any(|other| {
            collides(
                position,
                kind.radius,
                other.position,
                other.radius,
                self.config.collision_factor,
            )
        });

        Constrained {
            position,
            rotation,
            colliding,
            wall: None,
        }
    }

    /// Check that a placement satisfies the containment rule for its category
    pub fn check_containment(
        &self,
        kind: &FurnitureType,
        room: &RoomSpec,
        placement: &Placement,
        tolerance: f32,
    ) -> Result<(), Breach> {
        let p = placement.position();
        if !(p.x.is_finite() && p.z.is_finite() && placement.rotation.is_finite()) {
            return Err(Breach::NonFinite);
        }

        if !kind.wall_item {
            let lx = self.floor_limit(room.half_x, kind.radius);
            if p.x.abs() > lx + tolerance {
                return Err(Breach::OutsideFloor {
                    axis: 'x',
                    value: p.x,
                    limit: lx,
                });
            }
            let lz = self.floor_limit(room.half_z, kind.radius);
            if p.z.abs() > lz + tolerance {
                return Err(Breach::OutsideFloor {
                    axis: 'z',
                    value: p.z,
                    limit: lz,
                });
            }
            return Ok(());
        }

        let wall = nearest_wall(room, p);
        let distance = wall.distance(p, room.half_x, room.half_z);
        if (distance - self.config.wall_offset).abs() > tolerance {
            return Err(Breach::OffWall { wall, distance });
        }
        if normalize_angle(placement.rotation - wall.yaw()).abs() > tolerance {
            return Err(Breach::WrongYaw {
                wall,
                rotation: placement.rotation,
            });
        }
        let (value, limit) = if wall.is_x_wall() {
            (p.z, self.wall_limit(room.half_z))
        } else {
            (p.x, self.wall_limit(room.half_x))
        };
        if value.abs() > limit + tolerance {
            return Err(Breach::OffSegment { wall, value, limit });
        }
        Ok(())
    }
}

/// The wall nearest to `p`; ties resolve in [`Wall::ALL`] order
pub fn nearest_wall(room: &RoomSpec, p: Vec2) -> Wall {
    let mut best = Wall::ALL[0];
    let mut best_distance = best.distance(p, room.half_x, room.half_z);
    for wall in &Wall::ALL[1..] {
        let distance = wall.distance(p, room.half_x, room.half_z);
        if distance < best_distance {
            best = *wall;
            best_distance = distance;
        }
    }
    best
}

/// True iff the planar distance is below `(r1 + r2) · factor`
pub fn collides(a: Vec2, ra: f32, b: Vec2, rb: f32, factor: f32) -> bool {
    a.distance(&b) < (ra + rb) * factor
}

/// Floor items of `registry` as collision obstacles, optionally excluding one
///
/// Instances whose type is missing from the catalog are skipped.
pub fn obstacles_from(
    registry: &Registry,
    catalog: &Catalog,
    exclude: Option<InstanceId>,
) -> Vec<Obstacle> {
    registry
        .list()
        .into_iter()
        .filter(|instance| !instance.wall_item && Some(instance.id) != exclude)
        .filter_map(|instance| {
            let kind = catalog.furniture(instance.type_id).ok()?;
            Some(Obstacle {
                id: instance.id,
                position: instance.position,
                radius: kind.radius,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn room() -> RoomSpec {
        RoomSpec::new("standard", 4.4, 4.3)
    }

    fn table() -> FurnitureType {
        FurnitureType::new(2, "Pair table", 1.0)
    }

    fn board() -> FurnitureType {
        FurnitureType::new(7, "Whiteboard", 0.72).wall_mounted()
    }

    #[test]
    fn test_floor_clamp_per_axis() {
        let solver = Solver::default();
        let result = solver.constrain(&table(), &room(), Vec2::new(10.0, -1.0), 0.3, &[], false);
        assert!((result.position.x - 3.8).abs() < 1e-5);
        assert!((result.position.z + 1.0).abs() < 1e-5);
        assert!((result.rotation - 0.3).abs() < 1e-6);
        assert!(result.wall.is_none());
    }

    #[test]
    fn test_floor_interval_collapses_to_zero() {
        let solver = Solver::default();
        let tiny = RoomSpec::new("closet", 0.5, 0.5);
        let p = solver.clamp_floor(&table(), &tiny, Vec2::new(0.4, -0.4));
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_wall_snap_each_side() {
        let solver = Solver::default();
        let r = room();

        let (p, yaw, wall) = solver.snap_to_wall(&r, Vec2::new(0.5, -4.0));
        assert_eq!(wall, Wall::North);
        assert!((p.z + 4.2).abs() < 1e-5);
        assert!(yaw.abs() < 1e-6);

        let (p, yaw, wall) = solver.snap_to_wall(&r, Vec2::new(0.5, 4.0));
        assert_eq!(wall, Wall::South);
        assert!((p.z - 4.2).abs() < 1e-5);
        assert!((yaw - PI).abs() < 1e-6);

        let (p, yaw, wall) = solver.snap_to_wall(&r, Vec2::new(-4.0, 0.0));
        assert_eq!(wall, Wall::West);
        assert!((p.x + 4.3).abs() < 1e-5);
        assert!((yaw - FRAC_PI_2).abs() < 1e-6);

        let (p, yaw, wall) = solver.snap_to_wall(&r, Vec2::new(4.0, 0.0));
        assert_eq!(wall, Wall::East);
        assert!((p.x - 4.3).abs() < 1e-5);
        assert!((yaw + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_wall_snap_clamps_tangent() {
        let solver = Solver::default();
        let square = RoomSpec::new("square", 4.0, 4.0);
        let (p, _, wall) = solver.snap_to_wall(&square, Vec2::new(3.5, 3.5));
        // East and South are equally near; East wins the tie
        assert_eq!(wall, Wall::East);
        assert!((p.x - 3.9).abs() < 1e-5);
        assert!((p.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_wall_snap_from_outside_room() {
        let solver = Solver::default();
        let (p, _, wall) = solver.snap_to_wall(&room(), Vec2::new(0.0, -9.0));
        assert_eq!(wall, Wall::North);
        assert!((p.z + 4.2).abs() < 1e-5);
    }

    #[test]
    fn test_wall_item_ignores_rotation_and_collisions() {
        let solver = Solver::default();
        let obstacle = Obstacle {
            id: InstanceId(1),
            position: Vec2::new(0.0, -4.2),
            radius: 2.0,
        };
        let result = solver.constrain(
            &board(),
            &room(),
            Vec2::new(0.0, -3.9),
            1.0,
            &[obstacle],
            false,
        );
        assert!(!result.colliding);
        assert!(result.rotation.abs() < 1e-6);
        assert_eq!(result.wall, Some(Wall::North));
    }

    #[test]
    fn test_collision_is_advisory() {
        let solver = Solver::default();
        let obstacle = Obstacle {
            id: InstanceId(1),
            position: Vec2::new(1.0, 0.0),
            radius: 1.0,
        };
        let result = solver.constrain(
            &table(),
            &room(),
            Vec2::new(0.0, 0.0),
            0.0,
            &[obstacle],
            false,
        );
        assert!(result.colliding);
        assert_eq!(result.position, Vec2::ZERO);
    }

    #[test]
    fn test_collides_threshold_and_symmetry() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.49, 0.0);
        // (1 + 1) * 0.75 = 1.5
        assert!(collides(a, 1.0, b, 1.0, 0.75));
        assert!(collides(b, 1.0, a, 1.0, 0.75));
        let c = Vec2::new(1.5, 0.0);
        assert!(!collides(a, 1.0, c, 1.0, 0.75));
        assert!(!collides(c, 1.0, a, 1.0, 0.75));
    }

    #[test]
    fn test_grid_snap() {
        let solver = Solver::default();
        let p = solver.snap_to_grid(Vec2::new(1.13, -0.88));
        assert!((p.x - 1.25).abs() < 1e-5);
        assert!((p.z + 1.0).abs() < 1e-5);

        let off = Solver::new(SolverConfig {
            grid_step: 0.0,
            ..SolverConfig::default()
        });
        assert_eq!(off.snap_to_grid(Vec2::new(1.13, 0.0)), Vec2::new(1.13, 0.0));
    }

    #[test]
    fn test_grid_snap_runs_before_clamp() {
        let solver = Solver::default();
        let result = solver.constrain(&table(), &room(), Vec2::new(3.9, 0.1), 0.0, &[], true);
        assert!((result.position.x - 3.8).abs() < 1e-5);
        assert!(result.position.z.abs() < 1e-5);
    }

    #[test]
    fn test_check_containment() {
        let solver = Solver::default();
        let r = room();
        let inside = Placement::new(table().id, Vec2::new(3.8, -3.7), 0.0);
        assert!(solver.check_containment(&table(), &r, &inside, 1e-4).is_ok());

        let outside = Placement::new(table().id, Vec2::new(3.95, 0.0), 0.0);
        assert!(matches!(
            solver.check_containment(&table(), &r, &outside, 0.1),
            Err(Breach::OutsideFloor { axis: 'x', .. })
        ));
        assert!(solver.check_containment(&table(), &r, &outside, 0.2).is_ok());
    }

    #[test]
    fn test_check_wall_containment() {
        let solver = Solver::default();
        let r = room();
        let flush = Placement::new(board().id, Vec2::new(1.0, 4.2), PI);
        assert!(solver.check_containment(&board(), &r, &flush, 0.01).is_ok());

        let negative_pi = Placement::new(board().id, Vec2::new(1.0, 4.2), -PI);
        assert!(solver.check_containment(&board(), &r, &negative_pi, 0.01).is_ok());

        let turned = Placement::new(board().id, Vec2::new(1.0, 4.2), 0.0);
        assert!(matches!(
            solver.check_containment(&board(), &r, &turned, 0.01),
            Err(Breach::WrongYaw { wall: Wall::South, .. })
        ));

        let floating = Placement::new(board().id, Vec2::new(1.0, 3.0), PI);
        assert!(matches!(
            solver.check_containment(&board(), &r, &floating, 0.01),
            Err(Breach::OffWall { .. })
        ));
    }

    #[test]
    fn test_check_containment_rejects_non_finite() {
        let solver = Solver::default();
        let r = room();
        let nan_x = Placement::new(table().id, Vec2::new(f32::NAN, 0.0), 0.0);
        assert_eq!(
            solver.check_containment(&table(), &r, &nan_x, 0.1),
            Err(Breach::NonFinite)
        );

        let spun = Placement::new(board().id, Vec2::new(1.0, 4.2), f32::INFINITY);
        assert_eq!(
            solver.check_containment(&board(), &r, &spun, 0.1),
            Err(Breach::NonFinite)
        );
    }

    #[test]
    fn test_obstacles_skip_wall_items_and_excluded() {
        let catalog = Catalog::builtin().unwrap();
        let mut registry = Registry::new();
        let pair = catalog.furniture(furnish_core::FurnitureTypeId(2)).unwrap();
        let board = catalog.furniture(furnish_core::FurnitureTypeId(7)).unwrap();
        let a = registry.add(pair, 0.0, 0.0, 0.0);
        let b = registry.add(pair, 2.0, 0.0, 0.0);
        registry.add(board, 0.0, -4.2, 0.0);

        let obstacles = obstacles_from(&registry, &catalog, Some(a));
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, b);
        assert!((obstacles[0].radius - 0.9).abs() < 1e-5);
    }
}
