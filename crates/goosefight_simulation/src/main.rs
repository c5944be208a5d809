//! Headless матч GOOSEFIGHT
//!
//! Запускает Bevy App без рендера: блочные спрайты, скриптованный ввод
//! игрока 1 (подойти и бить side light), пока раунд не закончится.

use bevy::prelude::*;
use std::time::Duration;

use goosefight_simulation::{
    create_headless_app, feed_assets, log_error, log_info, start_match, step_fixed,
    BlockSpriteSource, KeyEvent, MatchController, MatchSetup, PendingInput, RoundDecided, ROSTER,
};

/// 1/64 s: точно представимо во float
const TICK: Duration = Duration::from_micros(15_625);
const MAX_TICKS: u32 = 64 * 120;
/// Первый тик после отсчёта (3 s)
const FIGHT_TICK: u32 = 64 * 3;

/// Scripted player 1: once the countdown is over, hold `d` and press `j`
/// every quarter second.
fn scripted_input(tick: u32) -> Vec<KeyEvent> {
    match tick {
        t if t < FIGHT_TICK => Vec::new(),
        FIGHT_TICK => vec![KeyEvent::down("d")],
        t if t % 16 == 0 => vec![KeyEvent::down("j")],
        _ => Vec::new(),
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting GOOSEFIGHT headless match (seed: {})", seed));

    let roster = ROSTER.iter().map(|archetype| archetype.to_string());
    feed_assets(app.world_mut(), BlockSpriteSource::with_basic(roster));

    let setup = MatchSetup::new("kine", "ece").with_background("pond");
    if let Err(err) = start_match(app.world_mut(), setup) {
        log_error(&format!("❌ Cannot start match: {}", err));
        std::process::exit(1);
    }

    for tick in 0..MAX_TICKS {
        app.world_mut()
            .resource_mut::<PendingInput>()
            .extend(scripted_input(tick));
        step_fixed(&mut app, TICK);

        let mut decided = app.world_mut().resource_mut::<Events<RoundDecided>>();
        for event in decided.drain() {
            log_info(&format!("🏆 {} beats {} at tick {}", event.winner, event.loser, tick));
        }

        let Some(controller) = app.world().get_resource::<MatchController>() else {
            log_info(&format!("Match closed after {} ticks", tick + 1));
            return;
        };

        if tick % 256 == 0 {
            let state = controller.render_state();
            log_info(&format!(
                "Tick {}: {:?} | {} / {}",
                tick,
                controller.phase(),
                state.gpa_labels[0],
                state.gpa_labels[1]
            ));
        }
    }

    log_info("Simulation complete!");
}
