//! Particle bag: unordered timed particles, swap-remove compaction.

use bevy::prelude::*;

/// Effect family; decides how a particle is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EmitterKind {
    /// Expanding ring (dash start)
    Boom,
    /// Fast diamond shards (hit contact)
    Sparks,
    /// Long thin streak (dash / hit impact)
    Bolt,
    /// Grey puffs at the feet (jump)
    DustCloud,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation (radians), used by streak-like shapes
    pub angle: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, angle: f32, lifetime: f32) -> Self {
        Self {
            position,
            velocity,
            angle,
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// Remaining share of life: 1 → just spawned, 0 → expired.
    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Draw primitive for the renderer.
///
/// `size`: полные размеры фигуры вдоль её осей (до поворота на `rotation`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleShape {
    pub kind: EmitterKind,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBag {
    kind: EmitterKind,
    particles: Vec<Particle>,
}

impl ParticleBag {
    pub fn new(kind: EmitterKind) -> Self {
        Self {
            kind,
            particles: Vec::new(),
        }
    }

    pub fn kind(&self) -> EmitterKind {
        self.kind
    }

    pub fn emit(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Ages every particle; expired ones are swap-removed (order is not kept).
    pub fn advance(&mut self, delta: f32) {
        let mut index = 0;
        while index < self.particles.len() {
            let particle = &mut self.particles[index];
            particle.lifetime -= delta;
            if particle.lifetime <= 0.0 {
                self.particles.swap_remove(index);
                continue;
            }
            particle.position += particle.velocity * delta;
            index += 1;
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = ParticleShape> + '_ {
        self.particles.iter().map(|particle| self.shape(particle))
    }

    fn shape(&self, particle: &Particle) -> ParticleShape {
        let t = particle.life_ratio();
        let size = match self.kind {
            // Кольцо растёт от 0 до 150 к концу жизни
            EmitterKind::Boom => {
                let radius = 150.0 * (1.0 - t);
                Vec2::new(radius / 2.0, radius)
            }
            EmitterKind::Sparks => Vec2::new(200.0, 20.0) * t,
            EmitterKind::Bolt => Vec2::new(1000.0, 40.0) * (0.2 + 0.8 * t),
            EmitterKind::DustCloud => Vec2::splat(particle.lifetime * 200.0),
        };

        ParticleShape {
            kind: self.kind,
            position: particle.position,
            size,
            rotation: particle.angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_particles_are_removed() {
        let mut bag = ParticleBag::new(EmitterKind::Bolt);
        bag.emit(Particle::new(Vec2::ZERO, Vec2::X * 100.0, 0.0, 0.1));
        bag.emit(Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, 0.5));
        bag.emit(Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, 0.05));

        bag.advance(0.075);
        assert_eq!(bag.len(), 2);
        assert!(bag.particles().iter().all(|p| p.lifetime > 0.0));

        bag.advance(0.075);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.particles()[0].max_lifetime, 0.5);

        bag.advance(1.0);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_particles_move_with_velocity() {
        let mut bag = ParticleBag::new(EmitterKind::Sparks);
        bag.emit(Particle::new(Vec2::new(10.0, 10.0), Vec2::new(100.0, -50.0), 0.0, 1.0));

        bag.advance(0.5);
        assert_eq!(bag.particles()[0].position, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn test_shapes_scale_with_life() {
        let mut bag = ParticleBag::new(EmitterKind::Boom);
        bag.emit(Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, 0.1));

        // Только что созданное кольцо: нулевого размера
        let fresh = bag.shapes().next().unwrap();
        assert_eq!(fresh.size, Vec2::ZERO);

        bag.advance(0.05);
        let half = bag.shapes().next().unwrap();
        assert!(half.size.y > 70.0 && half.size.y < 80.0);
    }
}
