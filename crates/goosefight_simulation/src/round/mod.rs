//! Round / match domain
//!
//! Содержит:
//! - MatchController (фазы раунда, победитель, порядок тика)
//! - BulletTime + expelled ramp (глобальное замедление)
//! - RenderState (снимок для рендера)
//! - FightPlugin (bevy host: ресурсы, FixedUpdate, events)

pub mod bullet_time;
pub mod controller;
pub mod events;
pub mod plugin;
pub mod render;


pub use bullet_time::{expelled_divisor, BulletTime};
pub use controller::{
    ControlMode, MatchController, MatchSetup, RoundPhase, TickOutcome, TickReport,
    DEFAULT_VFX_SEED,
};
pub use events::{ExitToSelect, HitLanded, QuitRequested, RoundDecided};
pub use plugin::{
    feed_assets, publish_match_events, run_match_tick, start_match, step_asset_loader, AssetFeed,
    FightPlugin, LastTick, MatchKeybinds, PendingInput,
};
pub use render::{gpa_label, Banner, FighterView, RenderState, SpriteView};
