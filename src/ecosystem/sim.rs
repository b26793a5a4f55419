//! Free-roam ecosystem: one snake hunting a population of prey while its
//! hunger and energy meters run.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::log::info;
use bevy::math::Vec2;
use rand::prelude::*;

use super::prey::Prey;
use crate::effects::{EmitParams, ParticleSystem, Tint};
use crate::game::{GameEvent, GameInput, MAX_FRAME_DELTA};
use crate::session::Flow;
use crate::snake::FreeRoamSnake;

const FRAME_RATE: f32 = 60.0;
const SNAKE_LENGTH: usize = 15;
const SEGMENT_SPACING: f32 = 5.0;
const INITIAL_PREY: usize = 20;
const MIN_PREY: usize = 15;
const SPAWN_MIN_DISTANCE: f32 = 100.0;
const SPAWN_MAX_DISTANCE: f32 = 300.0;
pub const MAX_METER: f32 = 100.0;
const PREY_POINTS: u32 = 10;
const MEAL_ENERGY: f32 = 30.0;
const MEAL_HUNGER: f32 = 20.0;
const HUNGER_PER_FRAME: f32 = 0.1;
const ENERGY_PER_FRAME: f32 = 0.05;
const BOOST_ENERGY_PER_FRAME: f32 = 0.5;

pub struct Ecosystem {
    rng: StdRng,
    snake: FreeRoamSnake,
    prey: Vec<Prey>,
    particles: ParticleSystem,
    particles_enabled: bool,
    hunger: f32,
    energy: f32,
    score: u32,
    paused: bool,
    elapsed: f32,
    events: Vec<GameEvent>,
}

impl Ecosystem {
    pub fn new(rng: StdRng, particles_enabled: bool) -> Self {
        let mut ecosystem = Self {
            rng,
            snake: FreeRoamSnake::new(Vec2::ZERO, SNAKE_LENGTH, SEGMENT_SPACING),
            prey: Vec::new(),
            particles: ParticleSystem::default(),
            particles_enabled,
            hunger: 0.0,
            energy: MAX_METER,
            score: 0,
            paused: false,
            elapsed: 0.0,
            events: Vec::new(),
        };
        ecosystem.reset();
        ecosystem
    }

    pub fn snake(&self) -> &FreeRoamSnake {
        &self.snake
    }

    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn prey_caught(&self) -> u32 {
        self.score / PREY_POINTS
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts over with a fresh snake at the origin and a new prey population.
    pub fn reset(&mut self) {
        self.snake = FreeRoamSnake::new(Vec2::ZERO, SNAKE_LENGTH, SEGMENT_SPACING);
        self.prey.clear();
        for _ in 0..INITIAL_PREY {
            self.spawn_prey();
        }
        self.hunger = 0.0;
        self.energy = MAX_METER;
        self.score = 0;
        self.elapsed = 0.0;
    }

    pub fn handle_input(&mut self, input: GameInput) -> Flow {
        match input {
            GameInput::Quit | GameInput::Back => return Flow::Exit,
            GameInput::TogglePause => self.paused = !self.paused,
            GameInput::Confirm | GameInput::Steer(_) => {}
        }
        Flow::Continue
    }

    /// Turns the snake toward a world-space point.
    pub fn steer_toward(&mut self, target: Vec2, dt: Duration) {
        if !self.paused {
            let dt = dt.min(MAX_FRAME_DELTA).as_secs_f32();
            self.snake.steer_toward(target, dt);
        }
    }

    pub fn set_boost(&mut self, boosting: bool) {
        self.snake.set_boost(boosting);
    }

    pub fn update(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        let dt = dt.min(MAX_FRAME_DELTA).as_secs_f32();
        let frames = dt * FRAME_RATE;
        self.elapsed += dt;

        self.snake.update(dt);
        let head = *self.snake.head();

        let rng = &mut self.rng;
        self.prey.retain_mut(|prey| prey.update(head.position, dt, rng));

        self.hunt(head.position, head.width);

        if self.prey.len() < MIN_PREY {
            self.spawn_prey();
        }

        self.hunger += HUNGER_PER_FRAME * frames;
        self.energy -= ENERGY_PER_FRAME * frames;
        if self.snake.is_boosting() {
            self.energy -= BOOST_ENERGY_PER_FRAME * frames;
        }
        if self.hunger > MAX_METER || self.energy <= 0.0 {
            info!(
                "snake exhausted (hunger {:.0}, energy {:.0}) after catching {} prey, restarting",
                self.hunger,
                self.energy,
                self.prey_caught()
            );
            self.events.push(GameEvent::Exhausted { score: self.score });
            self.reset();
        }

        self.particles.update(dt);
    }

    fn hunt(&mut self, head: Vec2, reach: f32) {
        let mut caught = Vec::new();
        self.prey.retain(|prey| {
            let eaten = prey.position.distance(head) < reach;
            if eaten {
                caught.push(prey.position);
            }
            !eaten
        });

        for at in caught {
            self.snake.grow();
            self.score += PREY_POINTS;
            self.energy = (self.energy + MEAL_ENERGY).min(MAX_METER);
            self.hunger = (self.hunger - MEAL_HUNGER).max(0.0);
            if self.particles_enabled {
                self.particles
                    .emit(at, Tint::Prey, &EmitParams::prey_caught(), &mut self.rng);
            }
            self.events.push(GameEvent::PreyCaught { at });
        }
    }

    fn spawn_prey(&mut self) {
        let angle = self.rng.random_range(0.0..TAU);
        let distance = self
            .rng
            .random_range(SPAWN_MIN_DISTANCE..SPAWN_MAX_DISTANCE);
        let position = self.snake.head().position + Vec2::from_angle(angle) * distance;
        let prey = Prey::new(position, &mut self.rng);
        self.prey.push(prey);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn ecosystem(seed: u64) -> Ecosystem {
        Ecosystem::new(StdRng::seed_from_u64(seed), true)
    }

    #[test]
    fn test_reset_layout() {
        let eco = ecosystem(1);
        assert_eq!(eco.snake().len(), SNAKE_LENGTH);
        assert_eq!(eco.snake().head().position, Vec2::ZERO);
        assert_eq!(eco.prey().len(), INITIAL_PREY);
        for prey in eco.prey() {
            let distance = prey.position.length();
            assert!((SPAWN_MIN_DISTANCE - 0.01..SPAWN_MAX_DISTANCE + 0.01).contains(&distance));
        }
        assert_eq!(eco.energy(), MAX_METER);
        assert_eq!(eco.hunger(), 0.0);
    }

    #[test]
    fn test_catching_prey() {
        let mut eco = ecosystem(2);
        eco.energy = 50.0;
        eco.hunger = 10.0;
        let mut prey = Prey::new(Vec2::new(5.0, 0.0), &mut eco.rng);
        prey.energy = 100.0;
        eco.prey.push(prey);

        eco.update(FRAME);

        assert_eq!(eco.score(), 10);
        assert_eq!(eco.snake().len(), SNAKE_LENGTH + 1);
        assert!(eco.energy() > 79.0 && eco.energy() <= 80.0);
        assert!(eco.hunger() < 1.0);
        assert!(!eco.particles().is_empty());
        let events = eco.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::PreyCaught { .. }]));
    }

    #[test]
    fn test_meals_cap_energy() {
        let mut eco = ecosystem(3);
        eco.prey.push(Prey::new(Vec2::new(1.0, 1.0), &mut eco.rng));
        eco.update(FRAME);
        assert!(eco.energy() <= MAX_METER);
    }

    #[test]
    fn test_population_is_topped_up() {
        let mut eco = ecosystem(4);
        eco.prey.truncate(5);
        for _ in 0..20 {
            eco.update(FRAME);
        }
        assert!(eco.prey().len() >= MIN_PREY);
    }

    #[test]
    fn test_starvation_resets() {
        let mut eco = ecosystem(5);
        eco.score = 40;
        eco.hunger = MAX_METER;
        eco.prey.clear();
        eco.update(FRAME);
        assert_eq!(eco.drain_events(), vec![GameEvent::Exhausted { score: 40 }]);
        assert_eq!(eco.score(), 0);
        assert_eq!(eco.hunger(), 0.0);
        assert_eq!(eco.prey().len(), INITIAL_PREY);
    }

    #[test]
    fn test_boosting_drains_energy() {
        let mut idle = ecosystem(6);
        let mut boosting = ecosystem(6);
        idle.prey.clear();
        boosting.prey.clear();
        boosting.set_boost(true);
        for _ in 0..10 {
            idle.update(FRAME);
            boosting.update(FRAME);
        }
        assert!(boosting.energy() < idle.energy() - 4.0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut eco = ecosystem(7);
        eco.set_boost(true);
        eco.handle_input(GameInput::TogglePause);
        eco.update(FRAME);
        eco.steer_toward(Vec2::new(0.0, 100.0), FRAME);
        assert_eq!(eco.snake().head().position, Vec2::ZERO);
        assert_eq!(eco.snake().heading(), 0.0);
        assert_eq!(eco.elapsed(), 0.0);
        eco.handle_input(GameInput::TogglePause);
        assert!(!eco.is_paused());
        assert_eq!(eco.handle_input(GameInput::Quit), Flow::Exit);
    }
}
