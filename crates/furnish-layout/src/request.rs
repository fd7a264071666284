//! Wizard requests

use furnish_core::{FurnitureTypeId, Scenario};

/// A wizard invocation: scenario, requested seats/units and optional type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub scenario: Scenario,
    /// Seats for lecture, exam and circle; total seats for groups
    pub count: u32,
    /// Overrides the catalog's wizard default for the scenario
    pub type_id: Option<FurnitureTypeId>,
}

impl LayoutRequest {
    pub fn new(scenario: Scenario, count: u32) -> Self {
        Self {
            scenario,
            count,
            type_id: None,
        }
    }

    pub fn with_type(mut self, type_id: FurnitureTypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }
}
