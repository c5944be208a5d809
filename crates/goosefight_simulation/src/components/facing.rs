//! Facing + player side.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Horizontal orientation of a fighter (and of its sprite set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Screen-space angle of the facing direction (0 = right, π = left).
    pub fn heading_angle(self) -> f32 {
        match self {
            Facing::Left => std::f32::consts::PI,
            Facing::Right => 0.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing from a horizontal intent; `None` when there is no intent.
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Facing::Right)
        } else if axis < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Slot of a fighter inside the match (left spawn = `One`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, strum::Display)]
pub enum Side {
    #[strum(serialize = "goose1")]
    One,
    #[strum(serialize = "goose2")]
    Two,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn spawn_facing(self) -> Facing {
        match self {
            Side::One => Facing::Right,
            Side::Two => Facing::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_axis() {
        assert_eq!(Facing::from_axis(1.0), Some(Facing::Right));
        assert_eq!(Facing::from_axis(-0.5), Some(Facing::Left));
        assert_eq!(Facing::from_axis(0.0), None);
        assert_eq!(Facing::Left.flipped(), Facing::Right);
        assert_eq!(Facing::Right.heading_angle(), 0.0);
        assert_eq!(Facing::Left.heading_angle(), std::f32::consts::PI);
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::One.to_string(), "goose1");
        assert_eq!(Side::Two.opponent(), Side::One);
        assert_eq!(Side::Two.spawn_facing(), Facing::Left);
    }
}
