//! Attack kind = direction × strength.

use bevy::prelude::*;

use crate::input::{ActionFlags, DirectionFlags};

/// Directional component of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AttackDirection {
    Neutral,
    Side,
    Down,
}

/// Strength component of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AttackStrength {
    /// Grounded light attack
    Light,
    /// Light attack started while airborne
    Air,
    /// Grounded-only special
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct AttackKind {
    pub direction: AttackDirection,
    pub strength: AttackStrength,
}

impl AttackKind {
    pub const fn new(direction: AttackDirection, strength: AttackStrength) -> Self {
        Self { direction, strength }
    }

    /// Picks the attack for this tick's input, or `None` if nothing applies.
    ///
    /// Strength:
    /// - airborne + light → `Air`
    /// - grounded + light → `Light`
    /// - grounded + special → `Special` (в воздухе special игнорируется)
    ///
    /// Direction priority: up (→ neutral) > down > left/right (→ side) > neutral.
    pub fn select(actions: ActionFlags, held: DirectionFlags, grounded: bool) -> Option<Self> {
        let strength = if actions.contains(ActionFlags::LIGHT_ATTACK) {
            if grounded {
                AttackStrength::Light
            } else {
                AttackStrength::Air
            }
        } else if actions.contains(ActionFlags::SPECIAL_ATTACK) && grounded {
            AttackStrength::Special
        } else {
            return None;
        };

        let direction = if held.contains(DirectionFlags::UP) {
            AttackDirection::Neutral
        } else if held.contains(DirectionFlags::DOWN) {
            AttackDirection::Down
        } else if held.intersects(DirectionFlags::LEFT | DirectionFlags::RIGHT) {
            AttackDirection::Side
        } else {
            AttackDirection::Neutral
        };

        Some(Self::new(direction, strength))
    }

    /// Sprite-sheet animation name, e.g. `nlight`, `sair`, `dspecial`.
    pub fn animation_name(&self) -> &'static str {
        use AttackDirection::*;
        use AttackStrength::*;

        match (self.direction, self.strength) {
            (Neutral, Light) => "nlight",
            (Side, Light) => "slight",
            (Down, Light) => "dlight",
            (Neutral, Air) => "nair",
            (Side, Air) => "sair",
            (Down, Air) => "dair",
            (Neutral, Special) => "nspecial",
            (Side, Special) => "sspecial",
            (Down, Special) => "dspecial",
        }
    }

    /// Air attacks keep horizontal drift; everything else roots the fighter.
    pub fn allows_drift(&self) -> bool {
        self.strength == AttackStrength::Air
    }
}
