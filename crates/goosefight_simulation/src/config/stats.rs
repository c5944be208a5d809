//! Per-archetype stat tables (damage + knockback/stun duration).
//!
//! Формат: плоский JSON `{ "archetype": number }`, два файла:
//! `damages.json` и `knockbacks.json`. Загружаются один раз до боя.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{ConfigError, StatTable};

/// Resolved stats for one archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatProfile {
    /// GPA removed from the victim per landed hit
    pub damage: f32,
    /// Stun duration (seconds) applied to the victim
    pub knockback: f32,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTables {
    pub damage: HashMap<String, f32>,
    pub knockback: HashMap<String, f32>,
}

impl StatTables {
    pub fn from_json(damage_json: &str, knockback_json: &str) -> Result<Self, ConfigError> {
        let damage = serde_json::from_str(damage_json).map_err(|source| ConfigError::Parse {
            what: "damage table",
            source,
        })?;
        let knockback =
            serde_json::from_str(knockback_json).map_err(|source| ConfigError::Parse {
                what: "knockback table",
                source,
            })?;

        Ok(Self { damage, knockback })
    }

    pub fn from_paths(
        damage_path: impl AsRef<Path>,
        knockback_path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let damage_json = read_to_string(damage_path.as_ref())?;
        let knockback_json = read_to_string(knockback_path.as_ref())?;
        Self::from_json(&damage_json, &knockback_json)
    }

    /// Built-in tables shipped with the crate (`data/`).
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(
            include_str!("../../data/damages.json"),
            include_str!("../../data/knockbacks.json"),
        )
    }

    pub fn profile(&self, archetype: &str) -> Option<StatProfile> {
        Some(StatProfile {
            damage: *self.damage.get(archetype)?,
            knockback: *self.knockback.get(archetype)?,
        })
    }

    /// Strict lookup: configuration fault if either table lacks the archetype.
    pub fn require(&self, archetype: &str) -> Result<StatProfile, ConfigError> {
        let damage = Self::entry(&self.damage, StatTable::Damage, archetype)?;
        let knockback = Self::entry(&self.knockback, StatTable::Knockback, archetype)?;
        Ok(StatProfile { damage, knockback })
    }

    /// Проверка ростера до старта матча (не посреди боя).
    pub fn validate_roster<'a>(
        &self,
        archetypes: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        for archetype in archetypes {
            self.require(archetype)?;
        }
        Ok(())
    }

    fn entry(
        table: &HashMap<String, f32>,
        kind: StatTable,
        archetype: &str,
    ) -> Result<f32, ConfigError> {
        let value = *table.get(archetype).ok_or_else(|| ConfigError::MissingStat {
            table: kind,
            archetype: archetype.to_string(),
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidStat {
                table: kind,
                archetype: archetype.to_string(),
                value,
            });
        }

        Ok(value)
    }
}

pub(crate) fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_profile_lookup() {
        let tables = StatTables::from_json(r#"{"ece": 0.5}"#, r#"{"ece": 0.3}"#).unwrap();

        let profile = tables.profile("ece").unwrap();
        assert_eq!(profile.damage, 0.5);
        assert_eq!(profile.knockback, 0.3);
        assert!(tables.profile("arts").is_none());
    }

    #[test]
    fn test_missing_knockback_is_fatal() {
        let tables = StatTables::from_json(r#"{"ece": 0.5}"#, r#"{}"#).unwrap();

        let err = tables.validate_roster(["ece"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingStat { table: StatTable::Knockback, ref archetype } if archetype == "ece"
        ));
    }

    #[test]
    fn test_negative_stat_rejected() {
        let tables = StatTables::from_json(r#"{"ece": -1.0}"#, r#"{"ece": 0.3}"#).unwrap();
        assert!(matches!(
            tables.require("ece"),
            Err(ConfigError::InvalidStat { table: StatTable::Damage, .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = StatTables::from_json("{not json", "{}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { what: "damage table", .. }));
    }

    #[test]
    fn test_builtin_covers_roster() {
        let tables = StatTables::builtin().unwrap();
        tables
            .validate_roster(crate::config::ROSTER.iter().copied())
            .unwrap();
    }

    #[test]
    fn test_from_paths() {
        let mut damage = tempfile::NamedTempFile::new().unwrap();
        let mut knockback = tempfile::NamedTempFile::new().unwrap();
        write!(damage, r#"{{"stats": 0.25}}"#).unwrap();
        write!(knockback, r#"{{"stats": 0.4}}"#).unwrap();

        let tables = StatTables::from_paths(damage.path(), knockback.path()).unwrap();
        assert_eq!(tables.require("stats").unwrap().damage, 0.25);
    }

    #[test]
    fn test_missing_file() {
        let err = StatTables::from_paths("/nonexistent/d.json", "/nonexistent/k.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
