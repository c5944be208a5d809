//! Cosmetic particle effects of one fighter.
//!
//! Эффекты зависят только от прошедшего времени и ни на что в симуляции
//! не влияют. Джиттер углов/скоростей берётся из переданного RNG, поэтому
//! при одинаковом seed частицы воспроизводятся бит-в-бит.

pub mod particles;

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

use crate::components::Facing;

pub use particles::{EmitterKind, Particle, ParticleBag, ParticleShape};

/// Lifetime of boom / sparks / bolt particles.
pub const EFFECT_LIFETIME: f32 = 0.1;
/// Dust lingers twice as long.
pub const DUST_LIFETIME: f32 = EFFECT_LIFETIME * 2.0;

const SPARK_PAIRS: usize = 2;
const SPARK_SPEED: f32 = 1000.0;
const BOLT_SPEED: f32 = 100.0;
const DUST_CLOUDS: usize = 5;

fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    spread * rng.gen_range(-1.0f32..1.0)
}

fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FighterVfx {
    pub dust: ParticleBag,
    pub dash_boom: ParticleBag,
    pub dash_bolt: ParticleBag,
    pub hit_sparks: ParticleBag,
    pub hit_bolt: ParticleBag,
}

impl Default for FighterVfx {
    fn default() -> Self {
        Self {
            dust: ParticleBag::new(EmitterKind::DustCloud),
            dash_boom: ParticleBag::new(EmitterKind::Boom),
            dash_bolt: ParticleBag::new(EmitterKind::Bolt),
            hit_sparks: ParticleBag::new(EmitterKind::Sparks),
            hit_bolt: ParticleBag::new(EmitterKind::Bolt),
        }
    }
}

impl FighterVfx {
    /// Jump take-off: puffs spread sideways plus a column drifting toward `facing`.
    pub fn spawn_dust<R: Rng + ?Sized>(&mut self, feet: Vec2, facing: Facing, rng: &mut R) {
        for _ in 0..DUST_CLOUDS {
            let velocity = Vec2::new(400.0 * rng.gen_range(-1.0f32..1.0), -50.0 * rng.gen::<f32>());
            self.dust.emit(Particle::new(feet, velocity, 0.0, DUST_LIFETIME));
        }
        for _ in 0..DUST_CLOUDS {
            let velocity = Vec2::new(125.0 * facing.sign() + jitter(rng, 50.0), -200.0);
            self.dust.emit(Particle::new(feet, velocity, 0.0, DUST_LIFETIME));
        }
    }

    /// Dash start: a ring at the body centre and a bolt pointing where the dash goes.
    pub fn spawn_dash<R: Rng + ?Sized>(&mut self, center: Vec2, facing: Facing, rng: &mut R) {
        self.dash_boom
            .emit(Particle::new(center, Vec2::ZERO, 0.0, EFFECT_LIFETIME));

        let angle = facing.heading_angle() + jitter(rng, FRAC_PI_6);
        self.dash_bolt.emit(Particle::new(
            center,
            heading(angle) * BOLT_SPEED,
            angle,
            EFFECT_LIFETIME,
        ));
    }

    /// Hit contact: spark fan along `spark_angle`, one bolt along `bolt_angle`.
    pub fn spawn_hit<R: Rng + ?Sized>(
        &mut self,
        contact: Vec2,
        spark_angle: f32,
        bolt_angle: f32,
        rng: &mut R,
    ) {
        for _ in 0..(2 * SPARK_PAIRS + 1) {
            let angle = spark_angle + jitter(rng, FRAC_PI_3);
            self.hit_sparks.emit(Particle::new(
                contact,
                heading(angle) * SPARK_SPEED,
                angle,
                EFFECT_LIFETIME,
            ));
        }

        let angle = bolt_angle + jitter(rng, FRAC_PI_6);
        self.hit_bolt.emit(Particle::new(
            contact,
            heading(angle) * BOLT_SPEED,
            angle,
            EFFECT_LIFETIME,
        ));
    }

    fn bags(&self) -> [&ParticleBag; 5] {
        [
            &self.dust,
            &self.dash_boom,
            &self.dash_bolt,
            &self.hit_sparks,
            &self.hit_bolt,
        ]
    }

    pub fn advance(&mut self, delta: f32) {
        self.dust.advance(delta);
        self.dash_boom.advance(delta);
        self.dash_bolt.advance(delta);
        self.hit_sparks.advance(delta);
        self.hit_bolt.advance(delta);
    }

    pub fn shapes(&self) -> Vec<ParticleShape> {
        self.bags().into_iter().flat_map(|bag| bag.shapes()).collect()
    }

    pub fn particle_count(&self) -> usize {
        self.bags().iter().map(|bag| bag.len()).sum()
    }

    pub fn clear(&mut self) {
        self.dust.clear();
        self.dash_boom.clear();
        self.dash_bolt.clear();
        self.hit_sparks.clear();
        self.hit_bolt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::f32::consts::PI;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hit_spawns_spark_fan_and_bolt() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut vfx = FighterVfx::default();

        vfx.spawn_hit(Vec2::new(640.0, 600.0), 0.0, PI, &mut rng);

        assert_eq!(vfx.hit_sparks.len(), 5);
        assert_eq!(vfx.hit_bolt.len(), 1);
        for spark in vfx.hit_sparks.particles() {
            assert!(spark.angle.abs() <= FRAC_PI_3);
            assert!((spark.velocity.length() - SPARK_SPEED).abs() < 1e-2);
        }
    }

    #[test]
    fn test_effects_expire() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut vfx = FighterVfx::default();
        vfx.spawn_dash(Vec2::ZERO, Facing::Left, &mut rng);
        vfx.spawn_dust(Vec2::ZERO, Facing::Left, &mut rng);
        assert_eq!(vfx.particle_count(), 12);

        vfx.advance(0.15);
        // boom/bolt (0.1s) ушли, пыль (0.2s) ещё висит
        assert_eq!(vfx.particle_count(), 10);

        vfx.advance(0.1);
        assert_eq!(vfx.particle_count(), 0);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let spawn = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut vfx = FighterVfx::default();
            vfx.spawn_hit(Vec2::ZERO, 1.0, 2.0, &mut rng);
            vfx.spawn_dust(Vec2::ZERO, Facing::Right, &mut rng);
            vfx
        };

        assert_eq!(spawn(3), spawn(3));
    }
}
