//! Layout failure values

use furnish_core::{FurnitureTypeId, Scenario};
use thiserror::Error;

/// Why a wizard batch could not be placed. The registry is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutFailure {
    #[error("nothing to place: the requested count is zero")]
    EmptyRequest,

    #[error("no furniture type configured for the {0} layout")]
    NoTypeForScenario(Scenario),

    #[error("unknown furniture type: {0}")]
    UnknownType(FurnitureTypeId),

    #[error("room too small: a {width:.2} m item does not fit the usable width of {usable:.2} m")]
    NoColumns { width: f32, usable: f32 },

    #[error("room too small: {rows} row(s) need {required:.2} m of depth, only {usable:.2} m usable")]
    RowsExceedDepth { rows: u32, required: f32, usable: f32 },

    #[error("room too small: {required} cluster(s) needed, the grid holds {capacity}")]
    GridCapacity { capacity: u32, required: u32 },

    #[error("room too small: circle radius {radius:.2} m is below the minimum of {minimum:.2} m")]
    RadiusTooSmall { radius: f32, minimum: f32 },

    #[error("room too small: item {index} would leave the room ({reason})")]
    OutOfBounds { index: usize, reason: String },

    #[error("furniture type {0} could not be loaded")]
    AssetUnavailable(FurnitureTypeId),
}
