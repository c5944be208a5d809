//! Match events (published from FixedUpdate for the presentation layer)

use bevy::prelude::*;

use crate::components::Side;

/// Event: удар засчитан
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitLanded {
    pub victim: Side,
    pub attacker: Side,
    /// Точка контакта (экранные координаты)
    pub contact: Vec2,
    /// GPA жертвы после удара
    pub victim_gpa: f32,
}

/// Event: раунд решён (ровно один раз за раунд)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundDecided {
    pub winner: Side,
    pub loser: Side,
}

/// Event: баннер отыграл, пора на экран выбора персонажей
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitToSelect;

/// Event: игрок нажал escape
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitRequested;
