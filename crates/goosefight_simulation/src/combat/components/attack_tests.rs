//! Tests for attack selection and lifecycle.

#[cfg(test)]
mod tests {
    use crate::assets::{AssetCatalog, AssetSource, BlockSpriteSource};
    use crate::combat::{Attack, AttackContext, AttackDirection, AttackKind, AttackStrength};
    use crate::components::{DrawBox, Facing};
    use crate::config::FightTuning;
    use crate::input::{ActionFlags, DirectionFlags};
    use bevy::prelude::*;

    fn catalog(source: &mut BlockSpriteSource, archetype: &str) -> AssetCatalog {
        let mut catalog = AssetCatalog::default();
        catalog.insert_bundle(archetype, source.load(archetype).unwrap());
        catalog
    }

    fn body() -> DrawBox {
        DrawBox::from_mid_bottom(Vec2::new(100.0, 675.0), Vec2::splat(96.0))
    }

    #[test]
    fn test_select_strength() {
        let light = ActionFlags::LIGHT_ATTACK;
        let special = ActionFlags::SPECIAL_ATTACK;
        let none = DirectionFlags::empty();

        assert_eq!(
            AttackKind::select(light, none, true).map(|k| k.strength),
            Some(AttackStrength::Light)
        );
        assert_eq!(
            AttackKind::select(light, none, false).map(|k| k.strength),
            Some(AttackStrength::Air)
        );
        assert_eq!(
            AttackKind::select(special, none, true).map(|k| k.strength),
            Some(AttackStrength::Special)
        );
        // special в воздухе игнорируется
        assert_eq!(AttackKind::select(special, none, false), None);
        assert_eq!(AttackKind::select(ActionFlags::JUMP, none, true), None);
    }

    #[test]
    fn test_select_direction_priority() {
        let light = ActionFlags::LIGHT_ATTACK;

        let up_and_down = DirectionFlags::UP | DirectionFlags::DOWN | DirectionFlags::LEFT;
        assert_eq!(
            AttackKind::select(light, up_and_down, true).unwrap().direction,
            AttackDirection::Neutral
        );

        let down_and_side = DirectionFlags::DOWN | DirectionFlags::RIGHT;
        assert_eq!(
            AttackKind::select(light, down_and_side, true).unwrap().direction,
            AttackDirection::Down
        );

        assert_eq!(
            AttackKind::select(light, DirectionFlags::LEFT, false).unwrap().animation_name(),
            "sair"
        );
        assert_eq!(
            AttackKind::select(light, DirectionFlags::empty(), true).unwrap().animation_name(),
            "nlight"
        );
    }

    #[test]
    fn test_lifecycle_with_sprites() {
        let mut source = BlockSpriteSource::new(["ece".to_string()]);
        let assets = catalog(&mut source, "ece");
        let tuning = FightTuning::default();
        let ctx = AttackContext {
            archetype: "ece",
            facing: Facing::Right,
            body: body(),
        };

        let mut attack = Attack::default();
        assert!(attack.can_start());
        attack.start(
            AttackKind::new(AttackDirection::Side, AttackStrength::Light),
            Vec2::new(100.0, 627.0),
        );
        assert!(attack.is_threatening());
        assert!(!attack.can_start());
        assert!(!attack.allows_drift());

        // 6 кадров при 12 fps = 0.5s
        attack.animate(&ctx, 0.125, &assets, &tuning);
        assert!(attack.active);
        let hurtbox = attack.draw_box.unwrap();
        assert_eq!(hurtbox.center(), ctx.body.mid_right());
        assert_eq!(attack.sprite.as_ref().unwrap().id, "ece/slight/right/1");

        for _ in 0..3 {
            attack.animate(&ctx, 0.125, &assets, &tuning);
        }
        assert!(!attack.active);
        assert!(!attack.dangerous);
        assert!(attack.sprite.is_none());
        assert_eq!(attack.cooldown, tuning.attack_cooldown);
        assert!(!attack.can_start());

        attack.tick_cooldown(0.3);
        assert_eq!(attack.cooldown, 0.0);
        assert!(attack.can_start());
    }

    #[test]
    fn test_missing_sprites_use_fallback_timing() {
        let mut source = BlockSpriteSource::new(["ece".to_string()]).without_attacks("ece");
        let assets = catalog(&mut source, "ece");
        let tuning = FightTuning::default();
        let ctx = AttackContext {
            archetype: "ece",
            facing: Facing::Left,
            body: body(),
        };

        let mut attack = Attack::default();
        attack.start(
            AttackKind::new(AttackDirection::Neutral, AttackStrength::Special),
            Vec2::ZERO,
        );

        attack.animate(&ctx, 0.25, &assets, &tuning);
        assert!(attack.active);
        assert!(attack.draw_box.is_none());

        attack.animate(&ctx, 0.25, &assets, &tuning);
        assert!(!attack.active);
    }

    #[test]
    fn test_anchor_points() {
        let ctx = AttackContext {
            archetype: "ece",
            facing: Facing::Left,
            body: body(),
        };

        let side = AttackKind::new(AttackDirection::Side, AttackStrength::Air);
        assert_eq!(Attack::anchor_point(side, &ctx), ctx.body.mid_left());

        let dair = AttackKind::new(AttackDirection::Down, AttackStrength::Air);
        assert_eq!(Attack::anchor_point(dair, &ctx), ctx.body.mid_bottom());

        let dlight = AttackKind::new(AttackDirection::Down, AttackStrength::Light);
        assert_eq!(Attack::anchor_point(dlight, &ctx), ctx.body.center());

        let nspecial = AttackKind::new(AttackDirection::Neutral, AttackStrength::Special);
        assert_eq!(Attack::anchor_point(nspecial, &ctx), ctx.body.mid_top());
    }

    #[test]
    fn test_landing_spends_activation() {
        let mut attack = Attack::default();
        attack.start(
            AttackKind::new(AttackDirection::Neutral, AttackStrength::Air),
            Vec2::ZERO,
        );
        assert!(attack.allows_drift());

        attack.land();
        assert!(attack.active);
        assert!(!attack.is_threatening());
    }
}
