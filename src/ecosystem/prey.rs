//! Prey animals for the free-roam mode.

use bevy::math::Vec2;
use rand::prelude::*;

use crate::game::PREY_COLORS;

const FRAME_RATE: f32 = 60.0;
/// Prey notice the snake within this distance.
pub const SIGHT_RADIUS: f32 = 150.0;
pub const MAX_FEAR: f32 = 100.0;
/// Below this fear level a prey wanders around.
const CALM_FEAR: f32 = 20.0;
const FEAR_DECAY: f32 = 0.95;
const FLEE_FORCE: f32 = 0.01;
const FRICTION: f32 = 0.9;
const WANDER_FORCE: f32 = 0.5;
const BASE_MAX_SPEED: f32 = 2.0;
const FEAR_SPEED_BONUS: f32 = 0.05;

#[derive(Clone, Debug)]
pub struct Prey {
    pub position: Vec2,
    pub velocity: Vec2,
    /// 0 when calm, 100 with the snake right on top of it.
    pub fear: f32,
    pub size: f32,
    /// Index into the prey palette.
    pub shade: usize,
    pub energy: f32,
    wander_timer: f32,
}

impl Prey {
    pub fn new(position: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            fear: 0.0,
            size: rng.random_range(8..=15) as f32,
            shade: rng.random_range(0..PREY_COLORS.len()),
            energy: 100.0,
            wander_timer: rng.random_range(0.5..2.0),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    pub fn max_speed(&self) -> f32 {
        BASE_MAX_SPEED + self.fear * FEAR_SPEED_BONUS
    }

    /// Advances the prey by `dt` seconds with the snake head at `threat`.
    ///
    /// Returns false once the prey has run out of energy.
    pub fn update(&mut self, threat: Vec2, dt: f32, rng: &mut impl Rng) -> bool {
        let frames = dt * FRAME_RATE;
        let away = self.position - threat;
        let distance = away.length();

        if distance < SIGHT_RADIUS {
            self.fear = (MAX_FEAR * (1.0 - distance / SIGHT_RADIUS)).clamp(0.0, MAX_FEAR);
            let flee = away.try_normalize().unwrap_or(Vec2::X);
            self.velocity += flee * self.fear * FLEE_FORCE * frames;
        } else {
            self.fear *= FEAR_DECAY.powf(frames);
        }

        self.wander_timer -= dt;
        if self.wander_timer <= 0.0 {
            self.wander_timer = rng.random_range(0.5..2.0);
            if self.fear < CALM_FEAR {
                self.velocity += Vec2::new(
                    rng.random_range(-WANDER_FORCE..WANDER_FORCE),
                    rng.random_range(-WANDER_FORCE..WANDER_FORCE),
                );
            }
        }

        self.velocity *= FRICTION.powf(frames);
        self.velocity = self.velocity.clamp_length_max(self.max_speed());
        self.position += self.velocity * frames;

        self.energy -= dt * (1.0 + self.fear * 0.1);
        self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_prey_flees_from_snake() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut prey = Prey::new(Vec2::new(50.0, 0.0), &mut rng);
        for _ in 0..30 {
            prey.update(Vec2::ZERO, FRAME, &mut rng);
        }
        assert!(prey.position.x > 50.0);
        assert!(prey.fear > 0.0);
        assert!(prey.velocity.length() <= prey.max_speed() + 1e-4);
    }

    #[test]
    fn test_fear_is_proportional_to_distance() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut near = Prey::new(Vec2::new(15.0, 0.0), &mut rng);
        let mut far = Prey::new(Vec2::new(120.0, 0.0), &mut rng);
        near.update(Vec2::ZERO, FRAME, &mut rng);
        far.update(Vec2::ZERO, FRAME, &mut rng);
        assert!(near.fear > far.fear);
        assert!((0.0..=MAX_FEAR).contains(&near.fear));
        assert!(far.fear > 0.0);
    }

    #[test]
    fn test_fear_decays_out_of_sight() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut prey = Prey::new(Vec2::new(1000.0, 0.0), &mut rng);
        prey.fear = 80.0;
        for _ in 0..60 {
            prey.update(Vec2::ZERO, FRAME, &mut rng);
        }
        assert!(prey.fear < 10.0);
    }

    #[test]
    fn test_frightened_prey_tires_faster() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut calm = Prey::new(Vec2::new(1000.0, 0.0), &mut rng);
        let mut scared = Prey::new(Vec2::new(10.0, 0.0), &mut rng);
        for _ in 0..60 {
            calm.update(Vec2::ZERO, FRAME, &mut rng);
            scared.update(scared.position - Vec2::new(10.0, 0.0), FRAME, &mut rng);
        }
        assert!((calm.energy - 99.0).abs() < 0.01);
        assert!(scared.energy < 95.0);
    }

    #[test]
    fn test_prey_dies_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut prey = Prey::new(Vec2::new(1000.0, 0.0), &mut rng);
        prey.energy = 0.5;
        assert!(!prey.update(Vec2::ZERO, 1.0, &mut rng));
        assert!(!prey.is_alive());
    }
}
