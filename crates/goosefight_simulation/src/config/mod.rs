//! Configuration loaded once before combat: stat tables, tuning constants.
//!
//! Keybinds live in [`crate::input`] next to the event mapping.

pub mod error;
pub mod stats;
pub mod tuning;

pub use error::{ConfigError, StatTable};
pub use stats::{StatProfile, StatTables};
pub use tuning::FightTuning;

/// Selectable archetypes (character-select roster).
pub const ROSTER: [&str; 18] = [
    "astro", "biotech", "civarch", "comm", "csse", "ece", "fin", "kine", "mathco", "mathphys",
    "med", "mte", "nanophys", "opto", "pharm", "phil", "plant", "stats",
];

/// Sprite set used when an archetype's own sprites are not loaded.
pub const BASIC_ARCHETYPE: &str = "basic";
