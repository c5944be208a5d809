//! Physics / animation / round constants.
//!
//! Координаты экранные: y растёт вниз, земля на `ground_level`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FightTuning {
    /// Arena width (px); horizontal position is clamped to `[0, arena_width]`
    pub arena_width: f32,
    /// Ground plane y (px)
    pub ground_level: f32,
    /// Spawn height (fighters drop to the ground during the countdown)
    pub spawn_y: f32,
    /// Distance of each spawn point from its arena edge
    pub spawn_margin: f32,

    /// Starting (and maximum) GPA
    pub max_gpa: f32,

    /// Sprite animation speed (frames per second)
    pub animation_fps: f32,

    pub max_run_speed: f32,
    /// Symmetric accel/decel for horizontal movement (px/s²)
    pub run_acceleration: f32,
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_speed: f32,

    pub dash_duration: f32,
    pub dash_max_speed: f32,
    pub dash_floor_speed: f32,

    /// Knockback displacement speed at the start of a stun
    pub knockback_speed: f32,

    /// Refractory period after an attack animation ends
    pub attack_cooldown: f32,
    /// Frame count used when an attack animation is not loaded
    pub fallback_attack_frames: usize,

    pub countdown: f32,
    /// Real-time length of the round-over banner before leaving the fight
    pub banner_duration: f32,

    pub bullet_time_factor: f32,
    /// Wall-clock duration of bullet time
    pub bullet_time_duration: f32,

    /// Slow-down reached during the round-over "expelled" beat
    pub expelled_factor: f32,
    pub expelled_ramp: f32,

    /// Default fighter footprint when no sprite is loaded
    pub fallback_body_width: f32,
    pub fallback_body_height: f32,
}

impl Default for FightTuning {
    fn default() -> Self {
        Self {
            arena_width: 1280.0,
            ground_level: 675.0,
            spawn_y: 500.0,
            spawn_margin: 100.0,
            max_gpa: 4.0,
            animation_fps: 12.0,
            max_run_speed: 300.0,
            run_acceleration: 1500.0,
            gravity: 980.0,
            jump_speed: -400.0,
            dash_duration: 0.5,
            dash_max_speed: 1000.0,
            dash_floor_speed: 300.0,
            knockback_speed: 500.0,
            attack_cooldown: 0.25,
            fallback_attack_frames: 6,
            countdown: 3.0,
            banner_duration: 5.0,
            bullet_time_factor: 10.0,
            bullet_time_duration: 1.0,
            expelled_factor: 20.0,
            expelled_ramp: 1.0,
            fallback_body_width: 96.0,
            fallback_body_height: 96.0,
        }
    }
}

impl FightTuning {
    /// Partial JSON is fine: missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "fight tuning",
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Rejects values the tick cannot make progress with.
    ///
    /// Скорости/множители строго > 0 (иначе атака никогда не заканчивается
    /// или время стоит), длительности >= 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("arena_width", self.arena_width),
            ("animation_fps", self.animation_fps),
            ("fallback_attack_frames", self.fallback_attack_frames as f32),
            ("bullet_time_factor", self.bullet_time_factor),
            ("expelled_factor", self.expelled_factor),
            ("fallback_body_width", self.fallback_body_width),
            ("fallback_body_height", self.fallback_body_height),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning {
                    field,
                    requirement: "must be a finite positive number",
                    value,
                });
            }
        }

        let durations = [
            ("dash_duration", self.dash_duration),
            ("attack_cooldown", self.attack_cooldown),
            ("countdown", self.countdown),
            ("banner_duration", self.banner_duration),
            ("bullet_time_duration", self.bullet_time_duration),
            ("expelled_ramp", self.expelled_ramp),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning {
                    field,
                    requirement: "must be a finite non-negative duration",
                    value,
                });
            }
        }

        Ok(())
    }

    pub fn fallback_body_size(&self) -> Vec2 {
        Vec2::new(self.fallback_body_width, self.fallback_body_height)
    }

    /// Spawn x for the left (`0`) or right (`1`) side.
    pub fn spawn_x(&self, slot: usize) -> f32 {
        if slot == 0 {
            self.spawn_margin
        } else {
            self.arena_width - self.spawn_margin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning = FightTuning::from_json(r#"{"gravity": 500.0, "arena_width": 800.0}"#).unwrap();
        assert_eq!(tuning.gravity, 500.0);
        assert_eq!(tuning.arena_width, 800.0);
        assert_eq!(tuning.max_gpa, 4.0);
        assert_eq!(tuning.spawn_x(1), 700.0);
    }

    #[test]
    fn test_non_positive_rates_rejected() {
        let err = FightTuning::from_json(r#"{"animation_fps": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "animation_fps",
                ..
            }
        ));

        let err = FightTuning::from_json(r#"{"fallback_attack_frames": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "fallback_attack_frames",
                ..
            }
        ));

        assert!(FightTuning::from_json(r#"{"animation_fps": -12.0}"#).is_err());
    }

    #[test]
    fn test_negative_durations_rejected() {
        let err = FightTuning::from_json(r#"{"countdown": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning { field: "countdown", .. }));
        assert!(err.to_string().contains("countdown"));

        // Нулевая длительность допустима: рампа сразу на максимуме
        let tuning = FightTuning::from_json(r#"{"expelled_ramp": 0.0}"#).unwrap();
        assert_eq!(tuning.expelled_ramp, 0.0);
    }

    #[test]
    fn test_defaults() {
        let tuning = FightTuning::default();
        assert_eq!(tuning.spawn_x(0), 100.0);
        assert_eq!(tuning.spawn_x(1), 1180.0);
        assert!(tuning.expelled_factor > tuning.bullet_time_factor);
        assert!(tuning.validate().is_ok());
    }
}
