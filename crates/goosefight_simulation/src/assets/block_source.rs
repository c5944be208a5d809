//! Procedural sprite source: solid block frames, no image decoding.
//!
//! Используется headless бинарём и тестами: формы простые, но тайминги
//! (количество кадров) совпадают с настоящими спрайтшитами.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{
    AccessorySprites, Animation, ArchetypeBundle, AssetError, AssetSource, FacingFrames, SpriteFrame,
    SpriteMask, SpriteSet, ATTACK_ANIMATIONS, CHARACTER_ANIMATIONS,
};
use crate::config::BASIC_ARCHETYPE;

#[derive(Debug, Clone)]
pub struct BlockSpriteSource {
    archetypes: Vec<String>,
    body: (u32, u32),
    attack: (u32, u32),
    accessory: (u32, u32),
    without_attacks: HashSet<String>,
    failing: HashSet<String>,
}

impl BlockSpriteSource {
    pub fn new(archetypes: impl IntoIterator<Item = String>) -> Self {
        Self {
            archetypes: archetypes.into_iter().collect(),
            body: (96, 96),
            attack: (64, 48),
            accessory: (24, 24),
            without_attacks: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    /// `basic` first, then the given archetypes.
    pub fn with_basic(archetypes: impl IntoIterator<Item = String>) -> Self {
        let mut all = vec![BASIC_ARCHETYPE.to_string()];
        all.extend(archetypes.into_iter().filter(|a| a != BASIC_ARCHETYPE));
        Self::new(all)
    }

    pub fn body_size(mut self, width: u32, height: u32) -> Self {
        self.body = (width, height);
        self
    }

    pub fn attack_size(mut self, width: u32, height: u32) -> Self {
        self.attack = (width, height);
        self
    }

    /// Archetype loads without attack sprites (timing must use the fallback).
    pub fn without_attacks(mut self, archetype: &str) -> Self {
        self.without_attacks.insert(archetype.to_string());
        self
    }

    /// Archetype whose chunk fails to load.
    pub fn failing_for(mut self, archetype: &str) -> Self {
        self.failing.insert(archetype.to_string());
        self
    }

    fn sprite_set(
        archetype: &str,
        table: &[(&str, usize)],
        (width, height): (u32, u32),
    ) -> SpriteSet {
        // Маска тела: прозрачная рамка в 1/8 ширины по бокам, как у реальных гусей
        let inset = width / 8;
        let right_mask = SpriteMask::from_fn(width, height, |x, _| x >= inset && x < width - inset);
        let left_mask = right_mask.flipped_horizontal();

        let animations = table
            .iter()
            .map(|(name, count)| {
                let frames = |facing: &str, mask: &SpriteMask| {
                    (0..*count)
                        .map(|index| {
                            Arc::new(SpriteFrame {
                                id: format!("{}/{}/{}/{}", archetype, name, facing, index),
                                mask: mask.clone(),
                            })
                        })
                        .collect::<Animation>()
                };
                (
                    name.to_string(),
                    FacingFrames {
                        right: frames("right", &right_mask),
                        left: frames("left", &left_mask),
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        SpriteSet { animations }
    }
}

impl AssetSource for BlockSpriteSource {
    fn archetypes(&self) -> Vec<String> {
        self.archetypes.clone()
    }

    fn load(&mut self, archetype: &str) -> Result<ArchetypeBundle, AssetError> {
        if self.failing.contains(archetype) {
            return Err(AssetError::SourceFailed {
                archetype: archetype.to_string(),
                reason: "spritesheet unavailable".to_string(),
            });
        }

        let character = Self::sprite_set(archetype, &CHARACTER_ANIMATIONS, self.body);
        let attacks = (!self.without_attacks.contains(archetype))
            .then(|| Self::sprite_set(archetype, &ATTACK_ANIMATIONS, self.attack));

        let (width, height) = self.accessory;
        let accessory = AccessorySprites {
            right: Arc::new(SpriteFrame {
                id: format!("{}/accessory/right", archetype),
                mask: SpriteMask::filled(width, height),
            }),
            left: Arc::new(SpriteFrame {
                id: format!("{}/accessory/left", archetype),
                mask: SpriteMask::filled(width, height),
            }),
        };

        Ok(ArchetypeBundle {
            character: Some(character),
            attacks,
            accessory: (archetype != BASIC_ARCHETYPE).then_some(accessory),
        })
    }
}
