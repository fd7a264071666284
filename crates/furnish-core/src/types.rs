//! Floor-plane spatial types

use crate::id::FurnitureTypeId;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Mul, Sub};

/// A point or offset on the floor plane (world X and Z axes)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            z: self.z * scalar,
        }
    }
}

/// One of the four boundary walls of a rectangular room.
///
/// Yaw 0 faces +Z, so an item mounted on a wall faces into the room when
/// given that wall's [`Wall::yaw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    /// `x = -halfX`
    West,
    /// `x = +halfX`
    East,
    /// `z = -halfZ`
    North,
    /// `z = +halfZ`
    South,
}

impl Wall {
    /// Tie-break order used by nearest-wall selection
    pub const ALL: [Wall; 4] = [Wall::West, Wall::East, Wall::North, Wall::South];

    /// Inward-facing yaw for an item mounted on this wall
    pub fn yaw(&self) -> f32 {
        match self {
            Wall::North => 0.0,
            Wall::South => PI,
            Wall::West => FRAC_PI_2,
            Wall::East => -FRAC_PI_2,
        }
    }

    /// Distance from `p` to this wall's boundary line, positive inside the room
    pub fn distance(&self, p: Vec2, half_x: f32, half_z: f32) -> f32 {
        match self {
            Wall::West => p.x + half_x,
            Wall::East => half_x - p.x,
            Wall::North => p.z + half_z,
            Wall::South => half_z - p.z,
        }
    }

    /// True for walls perpendicular to the X axis
    pub fn is_x_wall(&self) -> bool {
        matches!(self, Wall::West | Wall::East)
    }

    /// -1 for the wall on the negative side of its axis, +1 otherwise
    pub fn sign(&self) -> f32 {
        match self {
            Wall::West | Wall::North => -1.0,
            Wall::East | Wall::South => 1.0,
        }
    }
}

/// Wrap an angle in radians into `(-PI, PI]`
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// A value-copy of one placement: `(typeId, x, z, rot, annotation)`.
///
/// Shared by history snapshots, persisted plans, presets and generator output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub type_id: FurnitureTypeId,
    pub x: f32,
    pub z: f32,
    #[serde(rename = "rot", default)]
    pub rotation: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Placement {
    pub fn new(type_id: FurnitureTypeId, position: Vec2, rotation: f32) -> Self {
        Self {
            type_id,
            x: position.x,
            z: position.z,
            rotation,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}
