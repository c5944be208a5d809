//! Fighter animation state.

use bevy::prelude::*;

use crate::combat::AttackKind;

/// What the fighter body is doing (selects its animation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Default)]
pub enum FighterAction {
    #[default]
    Idle,
    Move,
    Dash,
    Jump,
    Fall,
    /// Attack pose, same name as the attack animation
    Attack(AttackKind),
}

impl FighterAction {
    pub fn animation_name(&self) -> &'static str {
        match self {
            FighterAction::Idle => "idle",
            FighterAction::Move => "move",
            FighterAction::Dash => "dash",
            FighterAction::Jump => "jump",
            FighterAction::Fall => "fall",
            FighterAction::Attack(kind) => kind.animation_name(),
        }
    }

    /// Non-looping animations freeze on their last frame.
    pub fn holds_last_frame(&self) -> bool {
        matches!(
            self,
            FighterAction::Dash | FighterAction::Jump | FighterAction::Fall
        )
    }
}
