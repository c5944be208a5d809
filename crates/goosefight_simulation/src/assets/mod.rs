//! Sprite asset catalog + incremental loader.
//!
//! Декодирование картинок: внешний коллаборатор. Ядру нужны только:
//! - размер кадра и его маска (для коллизий),
//! - количество кадров анимации (для таймингов),
//! - стабильный id кадра (рендер сам знает, что рисовать).
//!
//! Каталог заполняется постепенно (`AssetLoader`, один архетип за тик),
//! поэтому все lookup'ы возвращают `Option`: вызывающий обязан решить,
//! откатиться на `basic` или пропустить рендер.

pub mod block_source;
pub mod loader;
pub mod mask;

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::components::Facing;
use crate::config::BASIC_ARCHETYPE;

pub use block_source::BlockSpriteSource;
pub use loader::{AssetLoader, AssetSource, LoaderState};
pub use mask::SpriteMask;

/// Fighter animations and their frame counts.
pub const CHARACTER_ANIMATIONS: [(&str, usize); 14] = [
    ("idle", 8),
    ("move", 8),
    ("dash", 4),
    ("jump", 4),
    ("fall", 2),
    ("nlight", 6),
    ("slight", 6),
    ("dlight", 6),
    ("nair", 6),
    ("sair", 6),
    ("dair", 6),
    ("nspecial", 6),
    ("sspecial", 6),
    ("dspecial", 6),
];

/// Attack hitbox animations and their frame counts.
pub const ATTACK_ANIMATIONS: [(&str, usize); 9] = [
    ("nlight", 6),
    ("slight", 6),
    ("dlight", 6),
    ("nair", 6),
    ("sair", 6),
    ("dair", 6),
    ("nspecial", 6),
    ("sspecial", 6),
    ("dspecial", 6),
];

/// Frame count of a character animation when no sprites are available.
pub fn fallback_frame_count(animation: &str) -> usize {
    CHARACTER_ANIMATIONS
        .iter()
        .find(|(name, _)| *name == animation)
        .map(|(_, frames)| *frames)
        .unwrap_or(1)
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no sprites loaded for archetype `{0}`")]
    UnknownArchetype(String),

    #[error("asset source failed for `{archetype}`: {reason}")]
    SourceFailed { archetype: String, reason: String },
}

/// One decoded frame as seen by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    /// Stable renderer handle, e.g. `ece/idle/right/3`
    pub id: String,
    pub mask: SpriteMask,
}

impl SpriteFrame {
    pub fn size(&self) -> Vec2 {
        self.mask.size()
    }
}

pub type Animation = Vec<Arc<SpriteFrame>>;

/// Right-facing frames and their mirrored left-facing copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacingFrames {
    pub right: Animation,
    pub left: Animation,
}

impl FacingFrames {
    pub fn get(&self, facing: Facing) -> &[Arc<SpriteFrame>] {
        match facing {
            Facing::Right => &self.right,
            Facing::Left => &self.left,
        }
    }
}

/// Named animations of one archetype.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteSet {
    pub animations: HashMap<String, FacingFrames>,
}

impl SpriteSet {
    pub fn animation(&self, name: &str, facing: Facing) -> Option<&[Arc<SpriteFrame>]> {
        let frames = self.animations.get(name)?.get(facing);
        if frames.is_empty() {
            None
        } else {
            Some(frames)
        }
    }
}

/// Single-sprite accessory (same frame for every action).
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorySprites {
    pub right: Arc<SpriteFrame>,
    pub left: Arc<SpriteFrame>,
}

/// Everything an `AssetSource` yields for one archetype (one loader chunk).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchetypeBundle {
    pub character: Option<SpriteSet>,
    pub attacks: Option<SpriteSet>,
    pub accessory: Option<AccessorySprites>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AssetCatalog {
    characters: HashMap<String, SpriteSet>,
    attacks: HashMap<String, SpriteSet>,
    accessories: HashMap<String, AccessorySprites>,
}

impl AssetCatalog {
    pub fn insert_bundle(&mut self, archetype: &str, bundle: ArchetypeBundle) {
        if let Some(character) = bundle.character {
            self.characters.insert(archetype.to_string(), character);
        }
        if let Some(attacks) = bundle.attacks {
            self.attacks.insert(archetype.to_string(), attacks);
        }
        if let Some(accessory) = bundle.accessory {
            self.accessories.insert(archetype.to_string(), accessory);
        }
    }

    pub fn has_character(&self, archetype: &str) -> bool {
        self.characters.contains_key(archetype)
    }

    pub fn character_animation(
        &self,
        archetype: &str,
        animation: &str,
        facing: Facing,
    ) -> Option<&[Arc<SpriteFrame>]> {
        self.characters.get(archetype)?.animation(animation, facing)
    }

    /// Archetype's own animation, otherwise the `basic` set's, otherwise `None`.
    pub fn character_animation_or_basic(
        &self,
        archetype: &str,
        animation: &str,
        facing: Facing,
    ) -> Option<&[Arc<SpriteFrame>]> {
        self.character_animation(archetype, animation, facing)
            .or_else(|| self.character_animation(BASIC_ARCHETYPE, animation, facing))
    }

    pub fn attack_animation(
        &self,
        archetype: &str,
        animation: &str,
        facing: Facing,
    ) -> Option<&[Arc<SpriteFrame>]> {
        self.attacks.get(archetype)?.animation(animation, facing)
    }

    pub fn accessory(&self, archetype: &str, facing: Facing) -> Option<&Arc<SpriteFrame>> {
        let sprites = self.accessories.get(archetype)?;
        Some(match facing {
            Facing::Right => &sprites.right,
            Facing::Left => &sprites.left,
        })
    }

    /// Strict lookup for tools that must not fall back.
    pub fn require_character(&self, archetype: &str) -> Result<&SpriteSet, AssetError> {
        self.characters
            .get(archetype)
            .ok_or_else(|| AssetError::UnknownArchetype(archetype.to_string()))
    }

    pub fn loaded_archetypes(&self) -> usize {
        self.characters.len()
    }
}
