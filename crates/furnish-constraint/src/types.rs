//! Solver input and output types

use furnish_core::{InstanceId, Vec2, Wall};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for validation violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Containment breach; never left in a committed registry
    Error,
    /// Advisory collision
    Warning,
}

/// Another floor item the candidate is checked against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: InstanceId,
    pub position: Vec2,
    pub radius: f32,
}

/// Result of constraining one candidate position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constrained {
    pub position: Vec2,
    pub rotation: f32,
    /// Advisory only; the position is applied regardless
    pub colliding: bool,
    /// The wall a wall item was snapped to
    pub wall: Option<Wall>,
}

/// Which containment rule a placement breaks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breach {
    /// A coordinate or the rotation is NaN or infinite
    NonFinite,
    /// Floor item outside `[-half + m·r, half - m·r]` on an axis
    OutsideFloor { axis: char, value: f32, limit: f32 },
    /// Wall item not flush with its nearest wall
    OffWall { wall: Wall, distance: f32 },
    /// Wall item not facing into the room
    WrongYaw { wall: Wall, rotation: f32 },
    /// Wall item past the usable segment of its wall
    OffSegment { wall: Wall, value: f32, limit: f32 },
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breach::NonFinite => write!(f, "position or rotation is not a finite number"),
            Breach::OutsideFloor { axis, value, limit } => {
                write!(f, "{} = {:.3} is outside ±{:.3}", axis, value, limit)
            }
            Breach::OffWall { wall, distance } => {
                write!(f, "{:?} wall item is {:.3} from its mounting line", wall, distance)
            }
            Breach::WrongYaw { wall, rotation } => write!(
                f,
                "{:?} wall item has yaw {:.3}, expected {:.3}",
                wall,
                rotation,
                wall.yaw()
            ),
            Breach::OffSegment { wall, value, limit } => write!(
                f,
                "{:?} wall item sits at {:.3} along the wall, limit ±{:.3}",
                wall, value, limit
            ),
        }
    }
}
