//! Screen-space sprite rectangles (y grows downward).

use bevy::prelude::*;

/// Axis-aligned draw rectangle: `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DrawBox {
    pub min: Vec2,
    pub size: Vec2,
}

impl DrawBox {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    /// Box whose bottom edge midpoint sits on `mid_bottom` (feet anchor).
    pub fn from_mid_bottom(mid_bottom: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(mid_bottom.x - size.x / 2.0, mid_bottom.y - size.y),
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x / 2.0, self.min.y)
    }

    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x / 2.0, self.min.y + self.size.y)
    }

    pub fn mid_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.min.y + self.size.y / 2.0)
    }

    pub fn mid_right(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x, self.min.y + self.size.y / 2.0)
    }

    /// Integer pixel offset of `other` relative to `self` (mask overlap offset).
    pub fn pixel_offset_to(&self, other: &DrawBox) -> IVec2 {
        (other.min - self.min).round().as_ivec2()
    }
}
