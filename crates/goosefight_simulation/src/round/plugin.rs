//! Bevy host for the match: resources, FixedUpdate chain, events.
//!
//! Порядок в FixedUpdate (строго последовательно):
//! 1. step_asset_loader: один чанк ассетов за тик
//! 2. run_match_tick: `MatchController::tick` с вводом этого тика
//! 3. publish_match_events: TickReport → bevy events
//!
//! `MatchController` опциональный ресурс. Нет матча (меню) → системы
//! ничего не делают. По `ExitToSelect` ресурс удаляется.

use bevy::prelude::*;
use rand::Rng;

use super::controller::{MatchController, MatchSetup, TickOutcome, TickReport};
use super::events::{ExitToSelect, HitLanded, QuitRequested, RoundDecided};
use crate::assets::{AssetCatalog, AssetLoader, AssetSource, LoaderState};
use crate::components::Side;
use crate::config::{ConfigError, FightTuning, StatTables};
use crate::input::{InputBatch, KeyEvent, Keybinds};
use crate::DeterministicRng;

/// Key events collected since the last fixed tick.
#[derive(Resource, Debug, Default)]
pub struct PendingInput {
    batch: InputBatch,
}

impl PendingInput {
    pub fn push(&mut self, event: KeyEvent) {
        self.batch.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = KeyEvent>) {
        self.batch.events.extend(events);
    }

    pub fn take(&mut self) -> InputBatch {
        std::mem::take(&mut self.batch)
    }
}

/// Report of the last match tick (consumed by `publish_match_events`).
#[derive(Resource, Debug, Default)]
pub struct LastTick(pub Option<TickReport>);

/// Sprite supplier driven by `step_asset_loader`.
#[derive(Resource)]
pub struct AssetFeed(pub Box<dyn AssetSource>);

/// Keybinds of player 1 / player 2.
#[derive(Resource, Debug, Clone)]
pub struct MatchKeybinds(pub [Keybinds; 2]);

/// Fight Plugin
///
/// Ресурсы `StatTables` и `MatchKeybinds` можно вставить заранее (свои
/// конфиги); иначе берутся встроенные. Ошибка встроенных конфигов
/// логируется, и `start_match` вернёт её же.
pub struct FightPlugin;

impl Plugin for FightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FightTuning>()
            .init_resource::<AssetCatalog>()
            .init_resource::<AssetLoader>()
            .init_resource::<PendingInput>()
            .init_resource::<LastTick>();

        if !app.world().contains_resource::<StatTables>() {
            match StatTables::builtin() {
                Ok(stats) => {
                    app.insert_resource(stats);
                }
                Err(err) => crate::logger::log_error(&format!("❌ Built-in stat tables: {}", err)),
            }
        }

        if !app.world().contains_resource::<MatchKeybinds>() {
            match Keybinds::builtin().and_then(Keybinds::pair) {
                Ok(binds) => {
                    app.insert_resource(MatchKeybinds(binds));
                }
                Err(err) => crate::logger::log_error(&format!("❌ Built-in keybinds: {}", err)),
            }
        }

        app.add_event::<HitLanded>()
            .add_event::<RoundDecided>()
            .add_event::<ExitToSelect>()
            .add_event::<QuitRequested>();

        app.add_systems(
            FixedUpdate,
            (step_asset_loader, run_match_tick, publish_match_events).chain(),
        );
    }
}

/// Creates the `MatchController` resource for `setup`.
///
/// Явный seed (`MatchSetup::with_seed`) не трогаем; иначе seed для VFX
/// берётся из `DeterministicRng`, если он есть в мире.
/// Ростер проверяется здесь: битые конфиги не доходят до боя.
pub fn start_match(world: &mut World, mut setup: MatchSetup) -> Result<(), ConfigError> {
    if setup.seed.is_none() {
        if let Some(mut rng) = world.get_resource_mut::<DeterministicRng>() {
            setup.seed = Some(rng.rng.gen());
        }
    }

    let tuning = world.get_resource::<FightTuning>().cloned().unwrap_or_default();
    let stats = match world.get_resource::<StatTables>() {
        Some(stats) => stats.clone(),
        None => StatTables::builtin()?,
    };
    let keybinds = match world.get_resource::<MatchKeybinds>() {
        Some(binds) => binds.0.clone(),
        None => Keybinds::pair(Keybinds::builtin()?)?,
    };

    let controller = MatchController::new(setup, &stats, tuning, keybinds)?;
    world.insert_resource(controller);
    world.resource_mut::<LastTick>().0 = None;
    Ok(())
}

/// Installs an asset source; loading (re)starts on the next fixed tick.
pub fn feed_assets(world: &mut World, source: impl AssetSource + 'static) {
    world.insert_resource(AssetFeed(Box::new(source)));
    if let Some(mut loader) = world.get_resource_mut::<AssetLoader>() {
        loader.restart();
    }
}

/// Система: один чанк загрузки ассетов за тик
pub fn step_asset_loader(
    feed: Option<ResMut<AssetFeed>>,
    mut loader: ResMut<AssetLoader>,
    mut catalog: ResMut<AssetCatalog>,
) {
    let Some(mut feed) = feed else {
        return;
    };

    if loader.state() == LoaderState::Idle {
        loader.start(feed.0.as_ref());
    }
    if loader.is_loading() {
        loader.step(feed.0.as_mut(), &mut catalog);
    }
}

/// Система: тик матча (fixed dt = реальное время тика)
pub fn run_match_tick(
    time: Res<Time<Fixed>>,
    controller: Option<ResMut<MatchController>>,
    mut pending: ResMut<PendingInput>,
    catalog: Res<AssetCatalog>,
    mut last: ResMut<LastTick>,
) {
    let batch = pending.take();
    let Some(mut controller) = controller else {
        return;
    };

    let delta = time.delta_secs();
    last.0 = Some(controller.tick(delta, &batch, &catalog));
}

/// Система: TickReport → events
pub fn publish_match_events(
    mut commands: Commands,
    mut last: ResMut<LastTick>,
    controller: Option<Res<MatchController>>,
    mut hits: EventWriter<HitLanded>,
    mut decided: EventWriter<RoundDecided>,
    mut exit: EventWriter<ExitToSelect>,
    mut quit: EventWriter<QuitRequested>,
) {
    let Some(report) = last.0.take() else {
        return;
    };

    for (victim, hit) in [Side::One, Side::Two].into_iter().zip(report.hits) {
        let Some(hit) = hit else {
            continue;
        };
        let victim_gpa = controller
            .as_ref()
            .map_or(0.0, |controller| controller.fighter(victim).gpa);
        hits.write(HitLanded {
            victim,
            attacker: victim.opponent(),
            contact: hit.point,
            victim_gpa,
        });
    }

    if let Some(loser) = report.loser_recorded {
        decided.write(RoundDecided {
            winner: loser.opponent(),
            loser,
        });
    }

    match report.outcome {
        TickOutcome::Continue => {}
        TickOutcome::ExitToSelect => {
            exit.write(ExitToSelect);
            commands.remove_resource::<MatchController>();
        }
        TickOutcome::Quit => {
            quit.write(QuitRequested);
        }
    }
}
