//! Placed instance record

use furnish_core::{FurnitureTypeId, InstanceId, Placement, Vec2};
use serde::{Deserialize, Serialize};

/// A furniture instance placed in the room.
///
/// The type id and wall flag are stored directly so callers never have to
/// rediscover an instance's role from the catalog or the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstance {
    pub id: InstanceId,
    pub type_id: FurnitureTypeId,
    pub position: Vec2,
    /// Yaw in radians
    pub rotation: f32,
    /// Copied from the furniture type at creation
    pub wall_item: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl PlacedInstance {
    /// Value-copy of this instance as `(typeId, x, z, rot, annotation)`
    pub fn to_placement(&self) -> Placement {
        Placement {
            type_id: self.type_id,
            x: self.position.x,
            z: self.position.z,
            rotation: self.rotation,
            annotation: self.annotation.clone(),
        }
    }
}
