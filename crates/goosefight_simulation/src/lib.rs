//! GOOSEFIGHT Simulation Core
//!
//! Ядро 2D файтинга на двоих (headless, без рендера).
//! Хост Bevy 0.16: ресурсы + FixedUpdate, матч целиком живёт в
//! `MatchController` (порядок тика фиксирован, см. `round::controller`).
//!
//! Слои:
//! - config / input: таблицы статов, тюнинг, кейбинды (загружаются до боя)
//! - assets: спрайты + pixel-маски, загрузка по одному архетипу за тик
//! - fighter / combat / vfx: физика бойца, атаки, попадания, частицы
//! - round: фазы раунда, bullet time, RenderState, bevy plugin

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod assets;
pub mod combat;
pub mod components;
pub mod config;
pub mod fighter;
pub mod input;
pub mod logger;
pub mod round;
pub mod vfx;

// Re-export основных типов для удобства
pub use assets::{AssetCatalog, AssetLoader, AssetSource, BlockSpriteSource, LoaderState};
pub use combat::{Attack, AttackDirection, AttackKind, AttackStrength, HitContact};
pub use components::{DrawBox, Facing, Side};
pub use config::{ConfigError, FightTuning, StatProfile, StatTables, ROSTER};
pub use fighter::{Fighter, FighterAction};
pub use input::{InputBatch, KeyEvent, Keybinds};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use round::{
    feed_assets, start_match, ControlMode, ExitToSelect, FightPlugin, HitLanded, MatchController,
    MatchSetup, PendingInput, QuitRequested, RenderState, RoundDecided, RoundPhase, TickOutcome,
    TickReport,
};

/// Fixed tick rate of the match (Hz)
pub const TICK_RATE: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE));

        // Детерминистичный RNG (seed по умолчанию), если хост не вставил свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins(FightPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Из него берутся seed'ы матчей (`start_match`), VFX внутри матча
/// крутят собственный ChaCha8.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Runs exactly one FixedUpdate pass with a fixed `delta`.
///
/// Не зависит от wall clock: тесты и headless прогоны детерминированы.
pub fn step_fixed(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.resource_mut::<Time<Fixed>>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}
