//! Short-lived particle bursts triggered by game events.

use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::ops::Range;

use bevy::math::Vec2;
use rand::prelude::*;

use crate::items::PowerUpKind;

/// Velocity kept per 60 Hz frame.
const DRAG_PER_FRAME: f32 = 0.98;

/// Colour family of a particle. Mapped to an actual colour when drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tint {
    Food,
    PowerUp(PowerUpKind),
    Death,
    /// Index into the celebration palette.
    Celebration(u8),
    Prey,
}

pub const CELEBRATION_PALETTE_LEN: u8 = 5;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub size: f32,
    pub tint: Tint,
}

impl Particle {
    /// Remaining life as a fraction in `[0, 1]`, for fading.
    pub fn fade(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Shape of a burst.
#[derive(Clone, Debug)]
pub struct EmitParams {
    pub count: usize,
    /// Speed range in world units per second.
    pub speed: Range<f32>,
    /// Lifetime range in seconds.
    pub lifetime: Range<f32>,
    pub size: Range<f32>,
}

impl EmitParams {
    pub fn food() -> Self {
        Self {
            count: 8,
            speed: 2.0..8.0,
            lifetime: 0.5..1.0,
            size: 0.1..0.25,
        }
    }

    pub fn power_up() -> Self {
        Self {
            count: 12,
            speed: 3.0..10.0,
            lifetime: 0.6..1.1,
            size: 0.1..0.25,
        }
    }

    pub fn death() -> Self {
        Self {
            count: 30,
            speed: 3.0..14.0,
            lifetime: 1.5..2.0,
            size: 0.15..0.3,
        }
    }

    pub fn celebration() -> Self {
        Self {
            count: 20,
            speed: 4.0..16.0,
            lifetime: 0.8..1.4,
            size: 0.15..0.3,
        }
    }

    /// Burst for the free-roam world, which is measured in pixels.
    pub fn prey_caught() -> Self {
        Self {
            count: 20,
            speed: 50.0..150.0,
            lifetime: 0.5..1.5,
            size: 2.0..4.0,
        }
    }
}

/// Pool of live particles with a hard capacity.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}

impl ParticleSystem {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawns a burst at `origin`. The oldest particles are dropped when the
    /// pool is full.
    pub fn emit(&mut self, origin: Vec2, tint: Tint, params: &EmitParams, rng: &mut impl Rng) {
        for _ in 0..params.count {
            self.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(rng.random_range(0.0..TAU))
                    * sample(rng, &params.speed),
                lifetime: sample(rng, &params.lifetime),
                max_lifetime: 0.0,
                size: sample(rng, &params.size),
                tint,
            });
        }
    }

    /// Celebration burst with a random palette colour per particle.
    pub fn emit_celebration(&mut self, origin: Vec2, params: &EmitParams, rng: &mut impl Rng) {
        for _ in 0..params.count {
            let tint = Tint::Celebration(rng.random_range(0..CELEBRATION_PALETTE_LEN));
            self.emit(
                origin,
                tint,
                &EmitParams {
                    count: 1,
                    ..params.clone()
                },
                rng,
            );
        }
    }

    fn push(&mut self, mut particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        particle.max_lifetime = particle.lifetime;
        self.particles.push_back(particle);
    }

    /// Moves every particle and sweeps out the expired ones.
    pub fn update(&mut self, dt: f32) {
        let drag = DRAG_PER_FRAME.powf(dt * 60.0);
        for particle in self.particles.iter_mut() {
            particle.position += particle.velocity * dt;
            particle.velocity *= drag;
            particle.lifetime -= dt;
        }
        self.particles.retain(|particle| particle.lifetime > 0.0);
    }
}

fn sample(rng: &mut impl Rng, range: &Range<f32>) -> f32 {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_emit_respects_ranges() {
        let mut system = ParticleSystem::default();
        let params = EmitParams::food();
        system.emit(Vec2::new(3.0, 4.0), Tint::Food, &params, &mut rng());

        assert_eq!(system.len(), params.count);
        for particle in system.iter() {
            assert_eq!(particle.position, Vec2::new(3.0, 4.0));
            assert!(params.lifetime.contains(&particle.lifetime));
            assert_eq!(particle.lifetime, particle.max_lifetime);
            let speed = particle.velocity.length();
            assert!(speed >= params.speed.start - 1e-3 && speed <= params.speed.end + 1e-3);
        }
    }

    #[test]
    fn test_update_moves_and_expires() {
        let mut system = ParticleSystem::default();
        let params = EmitParams {
            count: 4,
            speed: 1.0..2.0,
            lifetime: 0.2..0.3,
            size: 1.0..1.0,
        };
        system.emit(Vec2::ZERO, Tint::Death, &params, &mut rng());

        system.update(0.1);
        assert_eq!(system.len(), 4);
        assert!(system.iter().all(|p| p.position != Vec2::ZERO));
        assert!(system.iter().all(|p| p.fade() < 1.0));

        system.update(0.25);
        assert!(system.is_empty());
    }

    #[test]
    fn test_expired_particles_never_survive_update() {
        let mut system = ParticleSystem::default();
        let mut rng = rng();
        for step in 0..40 {
            system.emit(Vec2::ZERO, Tint::Food, &EmitParams::food(), &mut rng);
            system.update(0.016 * (step % 5) as f32);
            assert!(system.iter().all(|p| p.lifetime > 0.0));
        }
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut system = ParticleSystem::with_capacity(10);
        let mut rng = rng();
        system.emit(Vec2::ZERO, Tint::Food, &EmitParams::food(), &mut rng);
        system.emit(Vec2::ONE, Tint::Death, &EmitParams::food(), &mut rng);

        assert_eq!(system.len(), 10);
        let deaths = system.iter().filter(|p| p.tint == Tint::Death).count();
        assert_eq!(deaths, 8);
    }

    #[test]
    fn test_zero_capacity_suppresses_emission() {
        let mut system = ParticleSystem::with_capacity(0);
        system.emit(Vec2::ZERO, Tint::Food, &EmitParams::food(), &mut rng());
        assert!(system.is_empty());
    }

    #[test]
    fn test_celebration_uses_palette() {
        let mut system = ParticleSystem::default();
        system.emit_celebration(Vec2::ZERO, &EmitParams::celebration(), &mut rng());
        assert_eq!(system.len(), 20);
        assert!(system.iter().all(|p| matches!(
            p.tint,
            Tint::Celebration(i) if i < CELEBRATION_PALETTE_LEN
        )));
    }
}
