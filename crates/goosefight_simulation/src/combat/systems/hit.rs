//! Hit detection: attack hurtbox vs. victim body, pixel-exact.

use bevy::prelude::*;

use crate::assets::SpriteFrame;
use crate::components::DrawBox;
use crate::config::StatProfile;

/// Placed sprite: frame + where it is drawn this tick.
#[derive(Debug, Clone, Copy)]
pub struct PlacedSprite<'a> {
    pub frame: &'a SpriteFrame,
    pub draw_box: DrawBox,
}

/// Outcome of a landed hit, before it is applied to the victim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitContact {
    /// First overlapping opaque pixel (screen space)
    pub point: Vec2,
    /// GPA removed from the victim
    pub damage: f32,
    /// Stun (and knockback) duration in seconds
    pub stun: f32,
    /// Direction the victim is pushed (radians, attacker → victim)
    pub knockback_angle: f32,
}

/// Pixel-mask overlap between the victim body and the attack hurtbox.
///
/// Возвращает точку первого пересечения в экранных координатах.
pub fn mask_contact(body: PlacedSprite<'_>, attack: PlacedSprite<'_>) -> Option<Vec2> {
    let offset = body.draw_box.pixel_offset_to(&attack.draw_box);
    body.frame
        .mask
        .overlap(&attack.frame.mask, offset)
        .map(|pixel| body.draw_box.min.round() + pixel.as_vec2())
}

/// Angle from `from` to `to` (screen space, y down).
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Resolves a detected contact into damage + knockback using the attacker's stats.
pub fn resolve_hit(
    contact: Vec2,
    victim_position: Vec2,
    attacker_position: Vec2,
    attacker_stats: StatProfile,
) -> HitContact {
    HitContact {
        point: contact,
        damage: attacker_stats.damage,
        stun: attacker_stats.knockback,
        knockback_angle: angle_between(attacker_position, victim_position),
    }
}
