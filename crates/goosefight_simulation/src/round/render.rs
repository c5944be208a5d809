//! Render-ready snapshot of the match (the core never draws).

use bevy::prelude::*;

use crate::components::{DrawBox, Facing, Side};
use crate::fighter::{Fighter, FighterAction};
use crate::vfx::ParticleShape;

/// Sprite reference + where to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub sprite_id: String,
    pub draw_box: DrawBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FighterView {
    pub side: Side,
    pub archetype: String,
    pub position: Vec2,
    pub facing: Facing,
    pub action: FighterAction,
    pub draw_box: DrawBox,
    /// `None` until the archetype (or `basic`) is loaded
    pub body: Option<SpriteView>,
    pub accessory: Option<SpriteView>,
    pub attack: Option<SpriteView>,
}

impl FighterView {
    pub fn of(fighter: &Fighter) -> Self {
        let body = fighter.sprite.as_ref().map(|sprite| SpriteView {
            sprite_id: sprite.id.clone(),
            draw_box: fighter.draw_box,
        });
        let accessory = match (&fighter.accessory.sprite, fighter.accessory.draw_box) {
            (Some(sprite), Some(draw_box)) => Some(SpriteView {
                sprite_id: sprite.id.clone(),
                draw_box,
            }),
            _ => None,
        };
        let attack = match (&fighter.attack.sprite, fighter.attack.draw_box) {
            (Some(sprite), Some(draw_box)) if fighter.attack.active => Some(SpriteView {
                sprite_id: sprite.id.clone(),
                draw_box,
            }),
            _ => None,
        };

        Self {
            side: fighter.side,
            archetype: fighter.archetype.clone(),
            position: fighter.position,
            facing: fighter.facing,
            action: fighter.action,
            draw_box: fighter.draw_box,
            body,
            accessory,
            attack,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub winner: Side,
    pub text: String,
    /// 0 → 1 over the first second of the banner
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub background_id: String,
    pub fighters: [FighterView; 2],
    pub particles: Vec<ParticleShape>,
    /// Whole seconds left (`3`, `2`, `1`) while counting down
    pub countdown_label: Option<String>,
    pub banner: Option<Banner>,
    pub gpa_labels: [String; 2],
}

/// `gpa 3.5`, rounded to two decimals.
pub fn gpa_label(gpa: f32) -> String {
    let rounded = (gpa * 100.0).round() / 100.0;
    // -0.0 после округления выглядит странно
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("gpa {}", rounded)
}

pub fn countdown_label(remaining: f32) -> Option<String> {
    (remaining > 0.0).then(|| format!("{}", remaining.ceil() as i32))
}
