//! Accessory: cosmetic follower trailing its fighter.

use bevy::prelude::*;
use std::sync::Arc;

use crate::assets::SpriteFrame;
use crate::components::DrawBox;

/// Position lags the fighter: `pos += (fighter.pos - pos) * dt`.
///
/// Геймплейно важен только один момент: центр его draw box служит точкой
/// запуска атаки, если у архетипа есть спрайт аксессуара.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessory {
    pub position: Vec2,
    pub sprite: Option<Arc<SpriteFrame>>,
    pub draw_box: Option<DrawBox>,
}

impl Accessory {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            sprite: None,
            draw_box: None,
        }
    }

    pub fn animate(&mut self, target: Vec2, sprite: Option<&Arc<SpriteFrame>>, delta: f32) {
        self.position += (target - self.position) * delta;

        self.sprite = sprite.cloned();
        self.draw_box = self
            .sprite
            .as_ref()
            .map(|sprite| DrawBox::from_mid_bottom(self.position, sprite.size()));
    }

    pub fn reset(&mut self, position: Vec2) {
        *self = Self::new(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteMask;

    #[test]
    fn test_lags_behind_target() {
        let mut accessory = Accessory::new(Vec2::ZERO);

        accessory.animate(Vec2::new(100.0, 50.0), None, 0.5);
        assert_eq!(accessory.position, Vec2::new(50.0, 25.0));
        assert!(accessory.draw_box.is_none());

        accessory.animate(Vec2::new(100.0, 50.0), None, 0.5);
        assert_eq!(accessory.position, Vec2::new(75.0, 37.5));
    }

    #[test]
    fn test_draw_box_sits_on_position() {
        let sprite = Arc::new(SpriteFrame {
            id: "ece/accessory/right".to_string(),
            mask: SpriteMask::filled(24, 24),
        });
        let mut accessory = Accessory::new(Vec2::new(100.0, 675.0));

        accessory.animate(Vec2::new(100.0, 675.0), Some(&sprite), 1.0 / 60.0);

        let draw_box = accessory.draw_box.unwrap();
        assert_eq!(draw_box.mid_bottom(), Vec2::new(100.0, 675.0));
        assert_eq!(draw_box.size, Vec2::splat(24.0));
    }
}
