//! Ошибки загрузки конфигурации.
//!
//! Все они фатальны на этапе подготовки матча: архетип без записи в таблицах
//! нельзя выпускать на арену, поэтому проверка идёт до `MatchController::new`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{table} table has no entry for archetype `{archetype}`")]
    MissingStat { table: StatTable, archetype: String },

    #[error("{table} entry for `{archetype}` must be a finite non-negative number, got {value}")]
    InvalidStat {
        table: StatTable,
        archetype: String,
        value: f32,
    },

    #[error("fight tuning `{field}` {requirement}, got {value}")]
    InvalidTuning {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },

    #[error("unknown binding `{name}` in keybinds for player {player}")]
    UnknownAction { player: usize, name: String },

    #[error("key `{key}` is bound twice for player {player}")]
    DuplicateKey { player: usize, key: String },

    #[error("keybinds define {found} players, at least {required} required")]
    MissingPlayerBinds { found: usize, required: usize },
}

/// Which stat table a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StatTable {
    Damage,
    Knockback,
}
