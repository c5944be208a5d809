//! Fighter: one combatant of the match.
//!
//! Порядок вызовов за тик (задаёт `MatchController`):
//! 1. `input()`: события этого тика → InputState (подавлены во время стана)
//! 2. `update()`: атака / дэш / прыжок → скорость → позиция → кулдаун
//! 3. `check_collide()`: против атаки соперника
//! 4. `animate()`: выбор анимации, draw box, аксессуар, атака, VFX
//!
//! Attack и Accessory принадлежат бойцу и получают нужные поля явно
//! (никаких обратных ссылок).

pub mod accessory;
pub mod action;


use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use crate::assets::{fallback_frame_count, AssetCatalog, SpriteFrame};
use crate::combat::{
    angle_between, mask_contact, resolve_hit, Attack, AttackContext, AttackKind, HitContact,
    PlacedSprite,
};
use crate::components::{DrawBox, Facing, Side};
use crate::config::{FightTuning, StatTables};
use crate::input::{ActionFlags, DirectionFlags, InputState, KeyEvent, Keybinds};
use crate::vfx::FighterVfx;

pub use accessory::Accessory;
pub use action::FighterAction;

/// Moves `current` toward `target` by at most `step`, never overshooting.
fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    /// Sprite-set + stat-table key, fixed at spawn
    pub archetype: String,
    pub side: Side,
    spawn: Vec2,

    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Health; the fighter loses at `<= 0`
    pub gpa: f32,

    pub stunned_time: f32,
    /// Stun length set by the last hit (knockback decays over it)
    pub stun_duration: f32,
    pub knockback_angle: f32,

    pub dash_time: f32,
    /// Direction stamped when the dash was accepted
    pub dash_vector: Vec2,
    /// Dash was running at the start of this tick (or started during it)
    dashed_this_tick: bool,

    pub input: InputState,
    pub attack: Attack,
    pub accessory: Accessory,

    pub action: FighterAction,
    pub frame_index: f32,
    pub sprite: Option<Arc<SpriteFrame>>,
    pub draw_box: DrawBox,

    pub vfx: FighterVfx,
}

impl Fighter {
    pub fn new(archetype: impl Into<String>, side: Side, tuning: &FightTuning) -> Self {
        let spawn = Vec2::new(tuning.spawn_x(side.index()), tuning.spawn_y);
        Self {
            archetype: archetype.into(),
            side,
            spawn,
            position: spawn,
            velocity: Vec2::ZERO,
            facing: side.spawn_facing(),
            gpa: tuning.max_gpa,
            stunned_time: 0.0,
            stun_duration: 0.0,
            knockback_angle: 0.0,
            dash_time: 0.0,
            dash_vector: Vec2::ZERO,
            dashed_this_tick: false,
            input: InputState::default(),
            attack: Attack::default(),
            accessory: Accessory::new(spawn),
            action: FighterAction::Idle,
            frame_index: 0.0,
            sprite: None,
            draw_box: DrawBox::from_mid_bottom(spawn, tuning.fallback_body_size()),
            vfx: FighterVfx::default(),
        }
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    pub fn is_grounded(&self, tuning: &FightTuning) -> bool {
        self.position.y >= tuning.ground_level
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned_time > 0.0
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time > 0.0
    }

    /// Dash invulnerability window for this tick.
    pub fn is_invulnerable(&self) -> bool {
        self.dash_time > 0.0 || self.dashed_this_tick
    }

    pub fn is_defeated(&self) -> bool {
        self.gpa <= 0.0
    }

    /// Merges this tick's key events; presses are dropped while stunned.
    pub fn input(&mut self, events: &[KeyEvent], keybinds: &Keybinds) {
        let stunned = self.is_stunned();
        self.input.apply(events, keybinds, stunned);
    }

    /// Physics + intent resolution for one tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        delta: f32,
        arena_width: f32,
        tuning: &FightTuning,
        rng: &mut R,
    ) {
        self.dashed_this_tick = self.dash_time > 0.0;

        if self.stunned_time > 0.0 {
            self.stunned_time = (self.stunned_time - delta).max(0.0);
        }

        let actions = self.input.take_actions();
        // Во время стана направления не управляют бойцом
        let held = if self.is_stunned() {
            DirectionFlags::empty()
        } else {
            self.input.held
        };
        let grounded = self.is_grounded(tuning);

        self.try_start_attack(actions, held, grounded);
        self.try_start_dash(actions, held, tuning, rng);

        if actions.contains(ActionFlags::JUMP) && grounded {
            self.velocity.y = tuning.jump_speed;
            self.vfx.spawn_dust(self.position, self.facing, rng);
        }

        self.integrate_velocity(delta, held, tuning);
        self.integrate_position(delta, arena_width, tuning);

        self.attack.tick_cooldown(delta);
    }

    fn try_start_attack(&mut self, actions: ActionFlags, held: DirectionFlags, grounded: bool) {
        if !self.attack.can_start() {
            return;
        }
        let Some(kind) = AttackKind::select(actions, held, grounded) else {
            return;
        };

        let origin = self.attack_origin();
        self.attack.start(kind, origin);

        crate::logger::log(&format!(
            "⚔️ {} ({}) starts {} at ({:.0}, {:.0})",
            self.side,
            self.archetype,
            kind.animation_name(),
            origin.x,
            origin.y
        ));
    }

    fn try_start_dash<R: Rng + ?Sized>(
        &mut self,
        actions: ActionFlags,
        held: DirectionFlags,
        tuning: &FightTuning,
        rng: &mut R,
    ) {
        if !actions.contains(ActionFlags::DASH) || self.attack.active || self.is_dashing() {
            return;
        }

        self.dash_time = tuning.dash_duration;
        self.dash_vector = Vec2::new(self.facing.sign(), held.vertical());
        self.dashed_this_tick = true;
        self.vfx.spawn_dash(self.draw_box.center(), self.facing, rng);

        crate::logger::log(&format!("💨 {} dashes {:?}", self.side, self.dash_vector));
    }

    /// Accessory draw-box centre when it has a sprite, otherwise body centre.
    pub fn attack_origin(&self) -> Vec2 {
        match (&self.accessory.sprite, self.accessory.draw_box) {
            (Some(_), Some(draw_box)) => draw_box.center(),
            _ => self.draw_box.center(),
        }
    }

    fn integrate_velocity(&mut self, delta: f32, held: DirectionFlags, tuning: &FightTuning) {
        let step = tuning.run_acceleration * delta;

        if self.dash_time > 0.0 {
            self.dash_time = (self.dash_time - delta).max(0.0);

            // Скорость спадает от max к floor за время дэша
            let remaining = if tuning.dash_duration > 0.0 {
                self.dash_time / tuning.dash_duration
            } else {
                0.0
            };
            let speed =
                tuning.dash_floor_speed + (tuning.dash_max_speed - tuning.dash_floor_speed) * remaining;
            let direction = self.dash_vector.normalize_or_zero();

            self.velocity.x = direction.x * speed;
            if direction.y != 0.0 {
                self.velocity.y = direction.y * speed;
            }
        } else if self.attack.allows_drift() {
            let intent = held.horizontal();
            if intent != 0.0 {
                self.velocity.x = approach(self.velocity.x, intent * tuning.max_run_speed, step);
                if !self.attack.active {
                    if let Some(facing) = Facing::from_axis(intent) {
                        self.facing = facing;
                    }
                }
            } else {
                self.velocity.x = approach(self.velocity.x, 0.0, step);
            }
        } else {
            // Наземная атака: горизонталь заблокирована
            self.velocity.x = approach(self.velocity.x, 0.0, step);
        }

        if !self.is_grounded(tuning) {
            self.velocity.y += tuning.gravity * delta;
        }
    }

    fn integrate_position(&mut self, delta: f32, arena_width: f32, tuning: &FightTuning) {
        self.position += self.velocity * delta;

        // Нокбэк: затухает линейно вместе со станом
        if self.stunned_time > 0.0 && self.stun_duration > 0.0 {
            let magnitude = tuning.knockback_speed * (self.stunned_time / self.stun_duration);
            let direction = Vec2::new(self.knockback_angle.cos(), self.knockback_angle.sin());
            self.position += direction * magnitude * delta;
        }

        if self.position.y >= tuning.ground_level {
            self.position.y = tuning.ground_level;
            self.velocity.y = 0.0;
        }

        self.position.x = self.position.x.clamp(0.0, arena_width);
    }

    /// Tests the opponent's attack against this fighter. `true` = hit landed.
    pub fn check_collide<R: Rng + ?Sized>(
        &mut self,
        opponent: &mut Fighter,
        stats: &StatTables,
        rng: &mut R,
    ) -> bool {
        self.collide(opponent, stats, rng).is_some()
    }

    /// Same as [`Fighter::check_collide`], but returns the applied hit.
    ///
    /// После предусловий атака соперника проверяется против нашей атаки:
    /// пересечение хёртбоксов = парирование (активация соперника сгорает,
    /// урона и стана нет).
    pub fn collide<R: Rng + ?Sized>(
        &mut self,
        opponent: &mut Fighter,
        stats: &StatTables,
        rng: &mut R,
    ) -> Option<HitContact> {
        if self.is_invulnerable() {
            return None;
        }
        if !opponent.attack.is_threatening() {
            return None;
        }

        let body = PlacedSprite {
            frame: self.sprite.as_deref()?,
            draw_box: self.draw_box,
        };
        let attack = PlacedSprite {
            frame: opponent.attack.sprite.as_deref()?,
            draw_box: opponent.attack.draw_box?,
        };

        if let Some(point) = self.clash_point(attack) {
            opponent.attack.land();
            opponent
                .vfx
                .spawn_hit(point, -FRAC_PI_2, opponent.facing.heading_angle(), rng);

            crate::logger::log_info(&format!(
                "🛡️ {} parries {} at ({:.0}, {:.0})",
                self.side, opponent.side, point.x, point.y
            ));
            return None;
        }

        let contact = mask_contact(body, attack)?;

        let Some(profile) = stats.profile(&opponent.archetype) else {
            // Ростер валидируется до старта матча, сюда попадать не должны
            crate::logger::log_error(&format!(
                "❌ No stats for `{}`, hit on {} ignored",
                opponent.archetype, self.side
            ));
            return None;
        };

        let hit = resolve_hit(contact, self.position, opponent.position, profile);

        self.gpa -= hit.damage;
        opponent.attack.land();
        self.stunned_time = hit.stun;
        self.stun_duration = hit.stun;
        self.knockback_angle = hit.knockback_angle;

        self.vfx.spawn_hit(
            hit.point,
            angle_between(opponent.position, self.position),
            angle_between(self.position, opponent.attack.origin),
            rng,
        );

        crate::logger::log_info(&format!(
            "💥 {} ({}) hits {} for {:.2} GPA → {:.2}",
            opponent.side, opponent.archetype, self.side, hit.damage, self.gpa
        ));

        Some(hit)
    }

    /// Contact between the opponent's hurtbox and our own attack, if any.
    fn clash_point(&self, opponent_attack: PlacedSprite<'_>) -> Option<Vec2> {
        let own = PlacedSprite {
            frame: self.attack.sprite.as_deref()?,
            draw_box: self.attack.draw_box?,
        };
        mask_contact(own, opponent_attack)
    }

    /// Picks the animation, advances frames, places sprites for this tick.
    pub fn animate(&mut self, delta: f32, assets: &AssetCatalog, tuning: &FightTuning) {
        let action = self.select_action(tuning);
        if action != self.action {
            self.action = action;
            self.frame_index = 0.0;
        }

        let name = action.animation_name();
        let frames = assets.character_animation_or_basic(&self.archetype, name, self.facing);
        let length = frames.map_or_else(|| fallback_frame_count(name), |frames| frames.len()) as f32;

        self.frame_index += delta * tuning.animation_fps;
        if self.frame_index >= length {
            self.frame_index = if action.holds_last_frame() {
                length - 1.0
            } else {
                self.frame_index.rem_euclid(length)
            };
        }

        self.sprite = frames.and_then(|frames| frames.get(self.frame_index as usize).cloned());
        let size = self
            .sprite
            .as_ref()
            .map_or_else(|| tuning.fallback_body_size(), |sprite| sprite.size());
        self.draw_box = DrawBox::from_mid_bottom(self.position, size);

        self.accessory.animate(
            self.position,
            assets.accessory(&self.archetype, self.facing),
            delta,
        );

        let ctx = AttackContext {
            archetype: &self.archetype,
            facing: self.facing,
            body: self.draw_box,
        };
        self.attack.animate(&ctx, delta, assets, tuning);

        self.vfx.advance(delta);
    }

    fn select_action(&self, tuning: &FightTuning) -> FighterAction {
        match self.attack.kind {
            Some(kind) if self.attack.active => FighterAction::Attack(kind),
            _ if self.is_dashing() => FighterAction::Dash,
            _ if !self.is_grounded(tuning) => {
                if self.velocity.y < 0.0 {
                    FighterAction::Jump
                } else {
                    FighterAction::Fall
                }
            }
            _ if self.velocity.x != 0.0 => FighterAction::Move,
            _ => FighterAction::Idle,
        }
    }

    /// Back to the exact spawn state (rematch). Attack/Accessory are reset in place.
    pub fn reset(&mut self, tuning: &FightTuning) {
        self.position = self.spawn;
        self.velocity = Vec2::ZERO;
        self.facing = self.side.spawn_facing();
        self.gpa = tuning.max_gpa;
        self.stunned_time = 0.0;
        self.stun_duration = 0.0;
        self.knockback_angle = 0.0;
        self.dash_time = 0.0;
        self.dash_vector = Vec2::ZERO;
        self.dashed_this_tick = false;
        self.input.clear();
        self.attack.reset();
        self.accessory.reset(self.spawn);
        self.action = FighterAction::Idle;
        self.frame_index = 0.0;
        self.sprite = None;
        self.draw_box = DrawBox::from_mid_bottom(self.spawn, tuning.fallback_body_size());
        self.vfx.clear();
    }
}
