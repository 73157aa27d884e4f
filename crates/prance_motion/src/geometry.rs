//! Actor geometry and facing

use serde::{Deserialize, Serialize};

use crate::error::{check_param, Result};

/// A position in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A footprint in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(64.0, 64.0)
    }
}

/// Which way the sprite artwork faces when drawn unflipped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Horizontal movement direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "left")]
    Backward,
    #[default]
    #[serde(rename = "right")]
    Forward,
}

impl Direction {
    /// `+1.0` when moving right, `-1.0` when moving left
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Direction of travel for a signed horizontal delta
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Forward)
        } else if delta < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

/// Whether the sprite must be mirrored so it faces its direction of travel.
///
/// Art facing right is mirrored while moving left, and art facing left is
/// mirrored while moving right.
pub fn needs_flip(facing: Facing, direction: Direction) -> bool {
    matches!(
        (facing, direction),
        (Facing::Right, Direction::Backward) | (Facing::Left, Direction::Forward)
    )
}

/// Host-owned placement of an actor; read-only to the engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorGeometry {
    pub anchor: Point,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub facing: Facing,
}

impl ActorGeometry {
    pub fn new(anchor: Point, size: Size, facing: Facing) -> Self {
        Self {
            anchor,
            size,
            facing,
        }
    }

    /// Anchored at `(x, y)` with the default footprint, facing right
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            anchor: Point::new(x, y),
            ..Default::default()
        }
    }

    /// Builder: set facing
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Builder: set footprint
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_param("size.width", self.size.width)?;
        check_param("size.height", self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_flip() {
        assert!(needs_flip(Facing::Right, Direction::Backward));
        assert!(!needs_flip(Facing::Right, Direction::Forward));
        assert!(needs_flip(Facing::Left, Direction::Forward));
        assert!(!needs_flip(Facing::Left, Direction::Backward));
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Forward.sign(), 1.0);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(0.0), None);
    }

    #[test]
    fn test_geometry_validation() {
        assert!(ActorGeometry::at(10.0, 20.0).validate().is_ok());
        assert!(ActorGeometry::at(0.0, 0.0)
            .with_size(-4.0, 10.0)
            .validate()
            .is_err());
    }
}
