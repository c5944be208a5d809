//! Input: key events → action / direction intents.
//!
//! Платформенный слой (окно, клавиатура) снаружи: он отдаёт имена клавиш,
//! мы маппим их через `Keybinds` в фиксированный набор:
//! - actions (`jump`, `light_attack`, `special_attack`, `dash`): one-shot,
//!   поглощаются в `Fighter::update` того же тика;
//! - directions (`up`, `down`, `left`, `right`): level-sensed (держим пока зажато).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::config::ConfigError;

/// Reserved key that quits the process regardless of keybinds.
pub const QUIT_KEY: &str = "escape";

bitflags! {
    /// One-shot action triggers accumulated since the last update.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActionFlags: u8 {
        const JUMP = 1 << 0;
        const LIGHT_ATTACK = 1 << 1;
        const SPECIAL_ATTACK = 1 << 2;
        const DASH = 1 << 3;
    }
}

bitflags! {
    /// Held direction keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirectionFlags: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl DirectionFlags {
    /// -1 (left), 0 (none or both), +1 (right).
    pub fn horizontal(self) -> f32 {
        let mut axis = 0.0;
        if self.contains(Self::RIGHT) {
            axis += 1.0;
        }
        if self.contains(Self::LEFT) {
            axis -= 1.0;
        }
        axis
    }

    /// Screen-space vertical intent: -1 (up), +1 (down), 0 otherwise. Up wins.
    pub fn vertical(self) -> f32 {
        if self.contains(Self::UP) {
            -1.0
        } else if self.contains(Self::DOWN) {
            1.0
        } else {
            0.0
        }
    }
}

/// Binding target names as they appear in `keybinds.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Binding {
    Jump,
    LightAttack,
    SpecialAttack,
    Dash,
    Up,
    Down,
    Left,
    Right,
}

impl Binding {
    fn action(self) -> Option<ActionFlags> {
        match self {
            Binding::Jump => Some(ActionFlags::JUMP),
            Binding::LightAttack => Some(ActionFlags::LIGHT_ATTACK),
            Binding::SpecialAttack => Some(ActionFlags::SPECIAL_ATTACK),
            Binding::Dash => Some(ActionFlags::DASH),
            _ => None,
        }
    }

    fn direction(self) -> Option<DirectionFlags> {
        match self {
            Binding::Up => Some(DirectionFlags::UP),
            Binding::Down => Some(DirectionFlags::DOWN),
            Binding::Left => Some(DirectionFlags::LEFT),
            Binding::Right => Some(DirectionFlags::RIGHT),
            _ => None,
        }
    }
}

/// Raw key event from the platform layer (key name, e.g. `"w"`, `"space"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Down(String),
    Up(String),
}

impl KeyEvent {
    pub fn down(key: impl Into<String>) -> Self {
        KeyEvent::Down(key.into())
    }

    pub fn up(key: impl Into<String>) -> Self {
        KeyEvent::Up(key.into())
    }

    pub fn key(&self) -> &str {
        match self {
            KeyEvent::Down(key) | KeyEvent::Up(key) => key,
        }
    }
}

/// Все события одного тика.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBatch {
    pub events: Vec<KeyEvent>,
}

impl InputBatch {
    pub fn new(events: Vec<KeyEvent>) -> Self {
        Self { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn quit_requested(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, KeyEvent::Down(key) if key == QUIT_KEY))
    }
}

/// Key name → binding for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keybinds {
    keys: HashMap<String, Binding>,
}

impl Keybinds {
    pub fn get(&self, key: &str) -> Option<Binding> {
        self.keys.get(key).copied()
    }

    /// Parses the `keybinds.json` shape: an array of `{ binding: key }` objects,
    /// one per player.
    pub fn from_json(json: &str) -> Result<Vec<Keybinds>, ConfigError> {
        let raw: Vec<HashMap<String, String>> =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                what: "keybinds",
                source,
            })?;

        raw.into_iter()
            .enumerate()
            .map(|(player, entries)| Self::from_entries(player, entries))
            .collect()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Keybinds>, ConfigError> {
        let json = crate::config::stats::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Built-in two-player layout (`data/keybinds.json`).
    pub fn builtin() -> Result<Vec<Keybinds>, ConfigError> {
        Self::from_json(include_str!("../../data/keybinds.json"))
    }

    /// First two players' binds; a config with fewer players is a fault.
    pub fn pair(binds: Vec<Keybinds>) -> Result<[Keybinds; 2], ConfigError> {
        let found = binds.len();
        let mut iter = binds.into_iter();
        match (iter.next(), iter.next()) {
            (Some(first), Some(second)) => Ok([first, second]),
            _ => Err(ConfigError::MissingPlayerBinds { found, required: 2 }),
        }
    }

    fn from_entries(player: usize, entries: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut keys = HashMap::with_capacity(entries.len());

        for (name, key) in entries {
            let binding = Binding::from_str(&name)
                .map_err(|_| ConfigError::UnknownAction { player, name: name.clone() })?;

            if keys.insert(key.clone(), binding).is_some() {
                return Err(ConfigError::DuplicateKey { player, key });
            }
        }

        Ok(Self { keys })
    }
}

/// Per-fighter input buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub actions: ActionFlags,
    pub held: DirectionFlags,
}

impl InputState {
    /// Merges this tick's events.
    ///
    /// While `suppressed` (stunned), key-downs are dropped; key-ups still
    /// release held directions so nothing stays stuck after the stun.
    pub fn apply(&mut self, events: &[KeyEvent], keybinds: &Keybinds, suppressed: bool) {
        for event in events {
            let Some(binding) = keybinds.get(event.key()) else {
                continue;
            };

            match event {
                KeyEvent::Down(_) if !suppressed => {
                    if let Some(action) = binding.action() {
                        self.actions.insert(action);
                    }
                    if let Some(direction) = binding.direction() {
                        self.held.insert(direction);
                    }
                }
                KeyEvent::Down(_) => {}
                KeyEvent::Up(_) => {
                    if let Some(direction) = binding.direction() {
                        self.held.remove(direction);
                    }
                }
            }
        }
    }

    /// Takes all pending one-shot actions.
    pub fn take_actions(&mut self) -> ActionFlags {
        std::mem::take(&mut self.actions)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binds() -> Keybinds {
        Keybinds::from_json(
            r#"[{"jump": "space", "light_attack": "j", "left": "a", "right": "d", "up": "w"}]"#,
        )
        .unwrap()
        .remove(0)
    }

    #[test]
    fn test_actions_are_one_shot() {
        let mut state = InputState::default();
        state.apply(&[KeyEvent::down("space"), KeyEvent::down("j")], &binds(), false);

        let taken = state.take_actions();
        assert!(taken.contains(ActionFlags::JUMP | ActionFlags::LIGHT_ATTACK));
        assert!(state.actions.is_empty());
    }

    #[test]
    fn test_directions_are_held_until_release() {
        let mut state = InputState::default();
        let binds = binds();

        state.apply(&[KeyEvent::down("d")], &binds, false);
        state.take_actions();
        assert_eq!(state.held.horizontal(), 1.0);

        state.apply(&[KeyEvent::up("d")], &binds, false);
        assert_eq!(state.held.horizontal(), 0.0);
    }

    #[test]
    fn test_suppressed_drops_presses_but_keeps_releases() {
        let mut state = InputState::default();
        let binds = binds();
        state.apply(&[KeyEvent::down("a")], &binds, false);

        state.apply(&[KeyEvent::down("j"), KeyEvent::down("d"), KeyEvent::up("a")], &binds, true);

        assert!(state.actions.is_empty());
        assert!(state.held.is_empty());
    }

    #[test]
    fn test_unknown_binding_rejected() {
        let err = Keybinds::from_json(r#"[{"honk": "h"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAction { player: 0, ref name } if name == "honk"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Keybinds::from_json(r#"[{"jump": "w", "up": "w"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { player: 0, .. }));
    }

    #[test]
    fn test_builtin_has_two_players() {
        let [first, second] = Keybinds::pair(Keybinds::builtin().unwrap()).unwrap();
        assert_eq!(first.get("space"), Some(Binding::Jump));
        assert_eq!(second.get("left"), Some(Binding::Left));
    }

    #[test]
    fn test_quit_key() {
        assert!(InputBatch::new(vec![KeyEvent::down(QUIT_KEY)]).quit_requested());
        assert!(!InputBatch::new(vec![KeyEvent::up(QUIT_KEY)]).quit_requested());
    }

    #[test]
    fn test_vertical_priority() {
        assert_eq!((DirectionFlags::UP | DirectionFlags::DOWN).vertical(), -1.0);
        assert_eq!(DirectionFlags::DOWN.vertical(), 1.0);
        assert_eq!((DirectionFlags::LEFT | DirectionFlags::RIGHT).horizontal(), 0.0);
    }
}
