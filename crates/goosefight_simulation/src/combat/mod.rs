//! Combat module
//!
//! Ответственность:
//! - Attack: выбор атаки по вводу, жизненный цикл, кулдаун, хёртбокс
//! - Hit: pixel-mask пересечение хёртбокса атаки с телом соперника
//! - Resolution: урон (GPA) + стан/нокбэк из таблиц статов атакующего
//!
//! Применение удара к бойцу (инвулнерабельность, VFX): `Fighter::check_collide`.

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{Attack, AttackContext, AttackDirection, AttackKind, AttackStrength};
pub use systems::{angle_between, mask_contact, resolve_hit, HitContact, PlacedSprite};
