//! Active-attack state of one fighter.
//!
//! Lifecycle: `idle → active → idle`.
//! - `start` (из `Fighter::update`): active + dangerous, frame 0
//! - `animate`: кадр += dt × fps; конец анимации → idle + refractory cooldown
//! - попадание снимает `dangerous` до конца этой активации (без double-hit)
//!
//! Атака не знает о своём бойце: всё нужное приходит через [`AttackContext`].

use bevy::prelude::*;
use std::sync::Arc;

use super::{AttackDirection, AttackKind};
use crate::assets::{AssetCatalog, SpriteFrame};
use crate::components::{DrawBox, Facing};
use crate::config::FightTuning;

/// Fighter fields the attack needs while animating.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext<'a> {
    pub archetype: &'a str,
    pub facing: Facing,
    /// Fighter draw box this tick
    pub body: DrawBox,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attack {
    pub active: bool,
    /// Can still land a hit during this activation
    pub dangerous: bool,
    /// Refractory timer; a new attack can start only at `<= 0`
    pub cooldown: f32,
    pub kind: Option<AttackKind>,
    pub frame_index: f32,
    /// Where the attack was launched from (accessory or body centre)
    pub origin: Vec2,
    pub sprite: Option<Arc<SpriteFrame>>,
    pub draw_box: Option<DrawBox>,
}

impl Attack {
    pub fn can_start(&self) -> bool {
        !self.active && self.cooldown <= 0.0
    }

    /// Active and still able to hit.
    pub fn is_threatening(&self) -> bool {
        self.active && self.dangerous
    }

    /// Active attack that does not lock horizontal movement.
    pub fn allows_drift(&self) -> bool {
        match self.kind {
            Some(kind) if self.active => kind.allows_drift(),
            _ => !self.active,
        }
    }

    pub fn start(&mut self, kind: AttackKind, origin: Vec2) {
        self.active = true;
        self.dangerous = true;
        self.kind = Some(kind);
        self.frame_index = 0.0;
        self.origin = origin;
        self.sprite = None;
        self.draw_box = None;
    }

    /// Marks the activation as spent after it lands.
    pub fn land(&mut self) {
        self.dangerous = false;
    }

    pub fn tick_cooldown(&mut self, delta: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - delta).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the animation and re-anchors the hurtbox on the fighter.
    ///
    /// Без спрайтов (архетип ещё грузится) таймер идёт по
    /// `fallback_attack_frames`, но спрайта и хёртбокса нет.
    pub fn animate(
        &mut self,
        ctx: &AttackContext<'_>,
        delta: f32,
        assets: &AssetCatalog,
        tuning: &FightTuning,
    ) {
        let Some(kind) = self.kind.filter(|_| self.active) else {
            return;
        };

        self.frame_index += delta * tuning.animation_fps;

        let frames = assets.attack_animation(ctx.archetype, kind.animation_name(), ctx.facing);
        let length = frames.map_or(tuning.fallback_attack_frames, |frames| frames.len());

        if self.frame_index >= length as f32 {
            self.finish(tuning.attack_cooldown);
            return;
        }

        self.sprite = frames.and_then(|frames| frames.get(self.frame_index as usize).cloned());
        self.draw_box = self
            .sprite
            .as_ref()
            .map(|sprite| DrawBox::from_center(Self::anchor_point(kind, ctx), sprite.size()));
    }

    /// Hurtbox anchor on the fighter's draw box:
    /// - neutral → top centre
    /// - side → facing edge
    /// - down (air) → bottom centre, down (grounded) → centre
    pub fn anchor_point(kind: AttackKind, ctx: &AttackContext<'_>) -> Vec2 {
        match kind.direction {
            AttackDirection::Neutral => ctx.body.mid_top(),
            AttackDirection::Side => match ctx.facing {
                Facing::Right => ctx.body.mid_right(),
                Facing::Left => ctx.body.mid_left(),
            },
            AttackDirection::Down if kind.allows_drift() => ctx.body.mid_bottom(),
            AttackDirection::Down => ctx.body.center(),
        }
    }

    fn finish(&mut self, cooldown: f32) {
        crate::logger::log(&format!(
            "✅ Attack finished ({:?}), cooldown {:.2}s",
            self.kind.map(|kind| kind.animation_name()),
            cooldown
        ));

        self.active = false;
        self.dangerous = false;
        self.frame_index = 0.0;
        self.cooldown = cooldown;
        self.sprite = None;
        self.draw_box = None;
    }
}
