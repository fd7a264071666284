//! Accessibility and acoustic scorer

use crate::report::{AccessibilityReport, AcousticBand, WallIssue};
use furnish_core::{Catalog, FurnitureType, RoomSpec, ScoringConfig, Wall};
use furnish_registry::{PlacedInstance, Registry};

/// Scores the current layout of a room
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Analyse `registry` in `room`. Instances of unknown types are ignored.
    pub fn score(
        &self,
        registry: &Registry,
        catalog: &Catalog,
        room: &RoomSpec,
    ) -> AccessibilityReport {
        let placed: Vec<(PlacedInstance, &FurnitureType)> = registry
            .list()
            .into_iter()
            .filter_map(|instance| match catalog.furniture(instance.type_id) {
                Ok(kind) => Some((instance, kind)),
                Err(e) => {
                    tracing::debug!("scoring skipped {}: {}", instance.id, e);
                    None
                }
            })
            .collect();

        let (min_clearance, qualifying_pairs) = self.min_clearance(&placed);
        let wall_issues = self.wall_issues(&placed, room);

        let damping: f32 = placed.iter().map(|(_, kind)| kind.acoustic).sum();
        let acoustic_score = damping / room.floor_area;

        AccessibilityReport {
            min_clearance,
            qualifying_pairs,
            wall_issues,
            acoustic_score,
            acoustic_band: AcousticBand::classify(acoustic_score, &room.acoustics),
            seat_total: placed.iter().map(|(_, kind)| kind.seats).sum(),
            instance_count: placed.len(),
        }
    }

    fn min_clearance(&self, placed: &[(PlacedInstance, &FurnitureType)]) -> (f32, usize) {
        let mut min = None::<f32>;
        let mut pairs = 0;

        for (i, (a, ka)) in placed.iter().enumerate() {
            for (b, kb) in &placed[i + 1..] {
                let gap = (a.position.distance(&b.position) - (ka.radius + kb.radius)).max(0.0);
                // touching items are a deliberate grouping
                if gap < self.config.grouping_tolerance {
                    continue;
                }
                pairs += 1;
                min = Some(min.map_or(gap, |m| m.min(gap)));
            }
        }

        (min.unwrap_or(self.config.default_min_clearance), pairs)
    }

    fn wall_issues(
        &self,
        placed: &[(PlacedInstance, &FurnitureType)],
        room: &RoomSpec,
    ) -> Vec<WallIssue> {
        let mut issues = Vec::new();
        for (instance, kind) in placed.iter().filter(|(i, _)| !i.wall_item) {
            for wall in Wall::ALL {
                let distance =
                    wall.distance(instance.position, room.half_x, room.half_z) - kind.radius;
                if distance > self.config.near_wall_tolerance
                    && distance < self.config.passage_width
                {
                    issues.push(WallIssue {
                        instance: instance.id,
                        wall,
                        distance,
                    });
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnish_core::{FurnitureTypeId, RoomId};

    fn setup() -> (Catalog, RoomSpec) {
        let catalog = Catalog::builtin().unwrap();
        let room = catalog.room(&RoomId::from("standard")).unwrap().clone();
        (catalog, room)
    }

    #[test]
    fn test_empty_room_defaults() {
        let (catalog, room) = setup();
        let report = Scorer::default().score(&Registry::new(), &catalog, &room);
        assert!((report.min_clearance - 10.0).abs() < f32::EPSILON);
        assert_eq!(report.qualifying_pairs, 0);
        assert!(report.wall_issues.is_empty());
        assert_eq!(report.acoustic_score, 0.0);
        assert_eq!(report.acoustic_band, AcousticBand::Reverberant);
        assert_eq!(report.seat_total, 0);
    }

    #[test]
    fn test_single_instance_defaults() {
        let (catalog, room) = setup();
        let mut registry = Registry::new();
        registry.add(catalog.furniture(FurnitureTypeId(2)).unwrap(), 0.0, 0.0, 0.0);

        let report = Scorer::default().score(&registry, &catalog, &room);
        assert!((report.min_clearance - 10.0).abs() < f32::EPSILON);
        assert!(report.wall_issues.is_empty());
        assert_eq!(report.seat_total, 2);
        assert_eq!(report.instance_count, 1);
    }

    #[test]
    fn test_min_clearance_skips_touching_pairs() {
        let (catalog, room) = setup();
        let pair = catalog.furniture(FurnitureTypeId(2)).unwrap();
        let mut registry = Registry::new();
        // radii 0.9 each: touching at 1.8, 1.0 gap at 2.8
        registry.add(pair, -2.0, 0.0, 0.0);
        registry.add(pair, -0.2, 0.0, 0.0);
        registry.add(pair, 2.6, 0.0, 0.0);

        let report = Scorer::default().score(&registry, &catalog, &room);
        assert_eq!(report.qualifying_pairs, 2);
        assert!((report.min_clearance - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_issue_window() {
        let (catalog, room) = setup();
        let pair = catalog.furniture(FurnitureTypeId(2)).unwrap();
        let mut registry = Registry::new();
        // edge 0.4 from the east wall: an issue
        let tight = registry.add(pair, 3.1, 0.0, 0.0);
        // flush against the west wall: fine
        registry.add(pair, -3.5, 0.0, 0.0);

        let report = Scorer::default().score(&registry, &catalog, &room);
        assert_eq!(report.wall_issue_count(), 1);
        assert_eq!(report.wall_issues[0].instance, tight);
        assert_eq!(report.wall_issues[0].wall, Wall::East);
        assert!((report.wall_issues[0].distance - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_wall_items_have_no_wall_issues() {
        let (catalog, room) = setup();
        let mut registry = Registry::new();
        registry.add(catalog.furniture(FurnitureTypeId(8)).unwrap(), 0.0, -4.2, 0.0);

        let report = Scorer::default().score(&registry, &catalog, &room);
        assert!(report.wall_issues.is_empty());
    }

    #[test]
    fn test_acoustic_bands() {
        let (catalog, room) = setup();
        let panel = catalog.furniture(FurnitureTypeId(8)).unwrap();
        let mut registry = Registry::new();
        registry.add(panel, 0.0, -4.2, 0.0);
        registry.add(panel, 0.0, 4.2, 0.0);

        // 6.0 / 75.7 ≈ 0.079
        let report = Scorer::default().score(&registry, &catalog, &room);
        assert_eq!(report.acoustic_band, AcousticBand::Acceptable);

        registry.add(panel, -4.3, 0.0, 0.0);
        registry.add(panel, 4.3, 0.0, 0.0);
        // 12.0 / 75.7 ≈ 0.159
        let report = Scorer::default().score(&registry, &catalog, &room);
        assert_eq!(report.acoustic_band, AcousticBand::Good);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let (catalog, room) = setup();
        let mut registry = Registry::new();
        registry.add(catalog.furniture(FurnitureTypeId(3)).unwrap(), 0.0, 0.0, 0.0);

        let json = Scorer::default()
            .score(&registry, &catalog, &room)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seat_total"], 8);
        assert_eq!(value["acoustic_band"], "reverberant");
    }
}
