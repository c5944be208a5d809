//! Incremental asset loading: one archetype chunk per outer tick.
//!
//! State machine: `Idle → Loading { progress, total } → Finished`.
//! Новый источник перезапускает машину (`restart` → `Idle`); уже
//! загруженное остаётся в каталоге. Ошибка источника для одного архетипа
//! не фатальна: каталог просто останется без него, и симуляция уйдёт в
//! fallback (`basic` / без спрайта).

use bevy::prelude::*;
use std::collections::VecDeque;

use super::{ArchetypeBundle, AssetCatalog, AssetError};

/// Supplier of decoded sprites (image decoding lives outside the core).
pub trait AssetSource: Send + Sync {
    /// Archetypes to load, in load order.
    fn archetypes(&self) -> Vec<String>;

    fn load(&mut self, archetype: &str) -> Result<ArchetypeBundle, AssetError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Loading { progress: usize, total: usize },
    Finished,
}

#[derive(Resource, Debug, Clone)]
pub struct AssetLoader {
    queue: VecDeque<String>,
    state: LoaderState,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            state: LoaderState::Idle,
        }
    }
}

impl AssetLoader {
    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == LoaderState::Finished
    }

    /// Loading is in progress (the loading overlay is shown).
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoaderState::Loading { .. })
    }

    /// Queues every archetype of `source`. No-op unless idle.
    pub fn start(&mut self, source: &dyn AssetSource) {
        if self.state != LoaderState::Idle {
            return;
        }

        self.queue = source.archetypes().into();
        let total = self.queue.len();
        self.state = if total == 0 {
            LoaderState::Finished
        } else {
            LoaderState::Loading { progress: 0, total }
        };

        crate::logger::log_info(&format!("📦 Asset loading started ({} archetypes)", total));
    }

    /// Drops the pending queue and goes back to `Idle` (a new source was installed).
    pub fn restart(&mut self) {
        if self.is_loading() {
            crate::logger::log_warning(&format!(
                "⚠️ Asset loading restarted with {} chunks pending",
                self.queue.len()
            ));
        }
        self.queue.clear();
        self.state = LoaderState::Idle;
    }

    /// Loads exactly one chunk. Returns the state after the step.
    pub fn step(&mut self, source: &mut dyn AssetSource, catalog: &mut AssetCatalog) -> LoaderState {
        let LoaderState::Loading { progress, total } = self.state else {
            return self.state;
        };

        if let Some(archetype) = self.queue.pop_front() {
            match source.load(&archetype) {
                Ok(bundle) => {
                    catalog.insert_bundle(&archetype, bundle);
                    crate::logger::log(&format!(
                        "📦 Loaded sprites for `{}` ({}/{})",
                        archetype,
                        progress + 1,
                        total
                    ));
                }
                Err(err) => {
                    crate::logger::log_warning(&format!("⚠️ Skipping `{}`: {}", archetype, err));
                }
            }
        }

        self.state = if self.queue.is_empty() {
            crate::logger::log_info("📦 Asset loading finished");
            LoaderState::Finished
        } else {
            LoaderState::Loading {
                progress: progress + 1,
                total,
            }
        };

        self.state
    }

    /// Runs the remaining chunks in one go (headless tools, tests).
    pub fn finish(&mut self, source: &mut dyn AssetSource, catalog: &mut AssetCatalog) {
        if self.state == LoaderState::Idle {
            self.start(source);
        }
        while self.is_loading() {
            self.step(source, catalog);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BlockSpriteSource;
    use crate::components::Facing;

    #[test]
    fn test_one_chunk_per_step() {
        let mut source = BlockSpriteSource::new(["basic", "ece", "kine"].map(String::from));
        let mut catalog = AssetCatalog::default();
        let mut loader = AssetLoader::default();

        loader.start(&source);
        assert_eq!(loader.state(), LoaderState::Loading { progress: 0, total: 3 });

        assert_eq!(
            loader.step(&mut source, &mut catalog),
            LoaderState::Loading { progress: 1, total: 3 }
        );
        assert_eq!(catalog.loaded_archetypes(), 1);
        assert!(catalog.character_animation("ece", "idle", Facing::Right).is_none());

        loader.step(&mut source, &mut catalog);
        assert_eq!(loader.step(&mut source, &mut catalog), LoaderState::Finished);
        assert_eq!(catalog.loaded_archetypes(), 3);

        // Finished: дальнейшие шаги ничего не делают
        assert_eq!(loader.step(&mut source, &mut catalog), LoaderState::Finished);
    }

    #[test]
    fn test_failed_chunk_is_skipped() {
        let mut source =
            BlockSpriteSource::new(["basic", "ece"].map(String::from)).failing_for("ece");
        let mut catalog = AssetCatalog::default();
        let mut loader = AssetLoader::default();

        loader.finish(&mut source, &mut catalog);

        assert!(loader.is_finished());
        assert!(catalog.has_character("basic"));
        assert!(!catalog.has_character("ece"));
    }

    #[test]
    fn test_restart_loads_new_source() {
        let mut first = BlockSpriteSource::new(["basic", "ece"].map(String::from));
        let mut second = BlockSpriteSource::new(["kine"].map(String::from));
        let mut catalog = AssetCatalog::default();
        let mut loader = AssetLoader::default();

        loader.start(&first);
        loader.step(&mut first, &mut catalog);
        loader.restart();
        assert_eq!(loader.state(), LoaderState::Idle);

        loader.finish(&mut second, &mut catalog);
        assert!(loader.is_finished());
        assert!(catalog.has_character("basic"));
        assert!(catalog.has_character("kine"));
        // Недогруженный хвост первого источника отброшен
        assert!(!catalog.has_character("ece"));
    }

    #[test]
    fn test_empty_source_finishes_immediately() {
        let source = BlockSpriteSource::new(Vec::<String>::new());
        let mut loader = AssetLoader::default();
        loader.start(&source);
        assert!(loader.is_finished());
    }
}
