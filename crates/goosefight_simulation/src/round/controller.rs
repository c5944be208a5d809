//! Match controller: owns both fighters, the round phases and global time scaling.
//!
//! Фазы: `Countdown(3s) → Active → RoundOver(5s баннер) → Finished`.
//!
//! Один тик (`tick`):
//! 1. escape → `Quit`, дальше ничего не считается
//! 2. таймер фазы (реальное время); ввод только в `Active`
//! 3. effective dt = real dt / max(bullet time, expelled ramp)
//! 4. update fighter1 → update fighter2 → collide(1 ← 2) → collide(2 ← 1)
//! 5. любой удар взводит bullet time (один раз за тик)
//! 6. animate обоих
//! 7. проигравший: сначала fighter1, потом fighter2; фиксируется один раз
//!
//! Порядок (fighter1 раньше fighter2): часть поведения, не менять.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::bullet_time::{expelled_divisor, BulletTime};
use super::render::{countdown_label, gpa_label, Banner, FighterView, RenderState};
use crate::assets::AssetCatalog;
use crate::combat::HitContact;
use crate::components::Side;
use crate::config::{ConfigError, FightTuning, StatTables};
use crate::fighter::Fighter;
use crate::input::{InputBatch, Keybinds};

/// Who receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ControlMode {
    /// Fighter 1 is local, fighter 2 stands idle
    #[default]
    LocalVsIdle,
    /// Both keybind sets are routed
    TwoPlayers,
}

/// Data handed over by character select.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSetup {
    pub fighters: [String; 2],
    pub background_id: String,
    pub control: ControlMode,
    /// Seed for cosmetic jitter (VFX). `None` → `start_match` draws one
    /// from `DeterministicRng` (or [`DEFAULT_VFX_SEED`] without a host).
    pub seed: Option<u64>,
}

pub const DEFAULT_VFX_SEED: u64 = 42;

impl MatchSetup {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            fighters: [first.into(), second.into()],
            background_id: "default".to_string(),
            control: ControlMode::default(),
            seed: None,
        }
    }

    pub fn with_background(mut self, background_id: impl Into<String>) -> Self {
        self.background_id = background_id.into();
        self
    }

    pub fn with_control(mut self, control: ControlMode) -> Self {
        self.control = control;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn vfx_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_VFX_SEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundPhase {
    Countdown { remaining: f32 },
    Active,
    RoundOver { elapsed: f32 },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickOutcome {
    #[default]
    Continue,
    /// Banner finished: go back to character select
    ExitToSelect,
    /// Escape pressed
    Quit,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Indexed by victim slot
    pub hits: [Option<HitContact>; 2],
    pub bullet_time_armed: bool,
    /// Set only on the tick the loser is recorded
    pub loser_recorded: Option<Side>,
    pub effective_dt: f32,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn any_hit(&self) -> bool {
        self.hits.iter().any(Option::is_some)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct MatchController {
    setup: MatchSetup,
    tuning: FightTuning,
    stats: StatTables,
    keybinds: [Keybinds; 2],
    fighters: [Fighter; 2],
    phase: RoundPhase,
    loser: Option<Side>,
    bullet_time: BulletTime,
    rng: ChaCha8Rng,
    ticks: u64,
}

impl MatchController {
    /// Validates the roster against the stat tables before anything starts.
    pub fn new(
        setup: MatchSetup,
        stats: &StatTables,
        tuning: FightTuning,
        keybinds: [Keybinds; 2],
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        stats.validate_roster(setup.fighters.iter().map(String::as_str))?;

        let fighters = [
            Fighter::new(setup.fighters[0].clone(), Side::One, &tuning),
            Fighter::new(setup.fighters[1].clone(), Side::Two, &tuning),
        ];

        crate::logger::log_info(&format!(
            "🥊 Match setup: {} vs {} on `{}` ({})",
            setup.fighters[0], setup.fighters[1], setup.background_id, setup.control
        ));

        Ok(Self {
            phase: RoundPhase::Countdown {
                remaining: tuning.countdown,
            },
            rng: ChaCha8Rng::seed_from_u64(setup.vfx_seed()),
            setup,
            tuning,
            stats: stats.clone(),
            keybinds,
            fighters,
            loser: None,
            bullet_time: BulletTime::default(),
            ticks: 0,
        })
    }

    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    pub fn tuning(&self) -> &FightTuning {
        &self.tuning
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn loser(&self) -> Option<Side> {
        self.loser
    }

    pub fn winner(&self) -> Option<Side> {
        self.loser.map(Side::opponent)
    }

    pub fn bullet_time(&self) -> &BulletTime {
        &self.bullet_time
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    /// Direct access for scripted scenarios (tests, tools).
    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.fighters[side.index()]
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Round-over slow-down for the current phase (1 outside the banner).
    fn expelled_divisor(&self) -> f32 {
        match self.phase {
            RoundPhase::RoundOver { elapsed } => expelled_divisor(
                elapsed,
                self.tuning.expelled_ramp,
                self.tuning.expelled_factor,
            ),
            _ => 1.0,
        }
    }

    /// Current divisor applied to real time.
    pub fn time_divisor(&self) -> f32 {
        let bullet = if self.bullet_time.is_armed() {
            self.tuning.bullet_time_factor
        } else {
            1.0
        };
        self.expelled_divisor().max(bullet)
    }

    pub fn tick(&mut self, real_dt: f32, input: &InputBatch, assets: &AssetCatalog) -> TickReport {
        let mut report = TickReport::default();

        if input.quit_requested() {
            crate::logger::log_info("👋 Quit requested");
            report.outcome = TickOutcome::Quit;
            return report;
        }

        let mut accepts_input = false;
        match self.phase {
            RoundPhase::Countdown { remaining } => {
                let remaining = remaining - real_dt;
                self.phase = if remaining <= 0.0 {
                    crate::logger::log_info("🔔 Fight!");
                    RoundPhase::Active
                } else {
                    RoundPhase::Countdown { remaining }
                };
            }
            RoundPhase::Active => {
                accepts_input = self.loser.is_none();
            }
            RoundPhase::RoundOver { elapsed } => {
                let elapsed = elapsed + real_dt;
                if elapsed >= self.tuning.banner_duration {
                    crate::logger::log_info("🏁 Round over, back to character select");
                    self.phase = RoundPhase::Finished;
                    report.outcome = TickOutcome::ExitToSelect;
                    return report;
                }
                self.phase = RoundPhase::RoundOver { elapsed };
            }
            RoundPhase::Finished => {
                report.outcome = TickOutcome::ExitToSelect;
                return report;
            }
        }

        if accepts_input {
            self.fighters[0].input(&input.events, &self.keybinds[0]);
            if self.setup.control == ControlMode::TwoPlayers {
                self.fighters[1].input(&input.events, &self.keybinds[1]);
            }
        }

        // Bullet time тикает в реальном времени
        let bullet = self
            .bullet_time
            .tick(real_dt, self.tuning.bullet_time_factor);
        let dt = real_dt / bullet.max(self.expelled_divisor());
        report.effective_dt = dt;

        let width = self.tuning.arena_width;
        let [first, second] = &mut self.fighters;

        first.update(dt, width, &self.tuning, &mut self.rng);
        second.update(dt, width, &self.tuning, &mut self.rng);

        let hit_on_first = first.collide(second, &self.stats, &mut self.rng);
        let hit_on_second = second.collide(first, &self.stats, &mut self.rng);
        report.hits = [hit_on_first, hit_on_second];

        if report.any_hit() {
            self.bullet_time.arm(self.tuning.bullet_time_duration);
            report.bullet_time_armed = true;
            crate::logger::log(&format!(
                "⏳ Bullet time armed ({}s at ×1/{})",
                self.tuning.bullet_time_duration, self.tuning.bullet_time_factor
            ));
        }

        first.animate(dt, assets, &self.tuning);
        second.animate(dt, assets, &self.tuning);

        if self.loser.is_none() {
            let loser = if first.is_defeated() {
                Some(Side::One)
            } else if second.is_defeated() {
                Some(Side::Two)
            } else {
                None
            };

            if let Some(loser) = loser {
                self.loser = Some(loser);
                report.loser_recorded = Some(loser);
                first.input.clear();
                second.input.clear();
                self.phase = RoundPhase::RoundOver { elapsed: 0.0 };

                crate::logger::log_info(&format!(
                    "🏆 {} wins ({} expelled)",
                    loser.opponent(),
                    loser
                ));
            }
        }

        self.ticks += 1;
        report
    }

    /// Rematch with the same setup: fighters back to spawn, phases restarted.
    pub fn reset(&mut self) {
        for fighter in &mut self.fighters {
            fighter.reset(&self.tuning);
        }
        self.phase = RoundPhase::Countdown {
            remaining: self.tuning.countdown,
        };
        self.loser = None;
        self.bullet_time.reset();
        self.rng = ChaCha8Rng::seed_from_u64(self.setup.vfx_seed());
        self.ticks = 0;

        crate::logger::log_info("🔄 Rematch");
    }

    pub fn render_state(&self) -> RenderState {
        let countdown = match self.phase {
            RoundPhase::Countdown { remaining } => countdown_label(remaining),
            _ => None,
        };
        let banner = match (self.phase, self.winner()) {
            (RoundPhase::RoundOver { elapsed }, Some(winner)) => Some(Banner {
                winner,
                text: format!("{} wins!", winner),
                opacity: elapsed.clamp(0.0, 1.0),
            }),
            _ => None,
        };

        RenderState {
            background_id: self.setup.background_id.clone(),
            fighters: [
                FighterView::of(&self.fighters[0]),
                FighterView::of(&self.fighters[1]),
            ],
            particles: self
                .fighters
                .iter()
                .flat_map(|fighter| fighter.vfx.shapes())
                .collect(),
            countdown_label: countdown,
            banner,
            gpa_labels: [
                gpa_label(self.fighters[0].gpa),
                gpa_label(self.fighters[1].gpa),
            ],
        }
    }

    /// Byte snapshot of the gameplay state (determinism checks).
    pub fn snapshot(&self) -> Vec<u8> {
        let mut snapshot = Vec::new();
        snapshot.extend_from_slice(&self.ticks.to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}|{:?}|{:?}", self.phase, self.loser, self.bullet_time).as_bytes());

        for fighter in &self.fighters {
            for value in [
                fighter.position.x,
                fighter.position.y,
                fighter.velocity.x,
                fighter.velocity.y,
                fighter.gpa,
                fighter.stunned_time,
                fighter.dash_time,
                fighter.attack.cooldown,
                fighter.attack.frame_index,
                fighter.frame_index,
            ] {
                snapshot.extend_from_slice(&value.to_le_bytes());
            }
            snapshot.extend_from_slice(format!("{:?}|{:?}", fighter.facing, fighter.action).as_bytes());
            for shape in fighter.vfx.shapes() {
                snapshot.extend_from_slice(&shape.position.x.to_le_bytes());
                snapshot.extend_from_slice(&shape.position.y.to_le_bytes());
                snapshot.extend_from_slice(&shape.rotation.to_le_bytes());
            }
        }

        snapshot
    }
}
