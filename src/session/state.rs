//! The arcade game session: phase state machine plus the per-tick rules that
//! tie the snake, collisions, spawning, power-ups and particles together.

use std::time::Duration;

use bevy::log::{debug, info};
use rand::prelude::*;

use super::effects::{ActiveEffects, TimedEffect};
use crate::effects::{EmitParams, ParticleSystem, Tint};
use crate::game::{
    ARENA, BASE_SPEED, Collision, Direction, EFFECT_TICKS, FOOD_POINTS, GameEvent, GameInput,
    GridBounds, INITIAL_SNAKE_LENGTH, INITIAL_SNAKE_POSITION, LEVEL_THRESHOLD, MAX_BASE_SPEED,
    MAX_FRAME_DELTA, MAX_SPEED, MIN_SPEED, POWER_UP_BONUS, POWER_UP_LIFETIME, Position,
    collision,
};
use crate::items::{
    Food, Obstacle, Occupancy, PowerUp, PowerUpKind, Spawner, generate_obstacles,
};
use crate::snake::Snake;
use crate::storage::Settings;

/// Cells ahead of the head kept free when obstacles are laid out.
const HEAD_CLEARANCE: i32 = 3;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Whether the application should keep running after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Rules and tuning for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub bounds: GridBounds,
    pub start: Position,
    pub start_direction: Direction,
    pub initial_length: usize,
    /// Moves per second at level 1.
    pub base_speed: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    pub max_base_speed: u32,
    pub food_points: u32,
    pub power_up_bonus: u32,
    pub level_threshold: u32,
    /// Chance per movement tick that a power-up appears.
    pub power_up_chance: f64,
    pub max_power_ups: usize,
    pub power_up_lifetime: f32,
    pub effect_ticks: u32,
    pub max_frame_delta: Duration,
    pub spawn_attempts: u32,
    pub particles_enabled: bool,
    pub particle_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bounds: ARENA,
            start: INITIAL_SNAKE_POSITION,
            start_direction: Direction::Right,
            initial_length: INITIAL_SNAKE_LENGTH,
            base_speed: BASE_SPEED,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            max_base_speed: MAX_BASE_SPEED,
            food_points: FOOD_POINTS,
            power_up_bonus: POWER_UP_BONUS,
            level_threshold: LEVEL_THRESHOLD,
            power_up_chance: 1.0 / 200.0,
            max_power_ups: 3,
            power_up_lifetime: POWER_UP_LIFETIME,
            effect_ticks: EFFECT_TICKS,
            max_frame_delta: MAX_FRAME_DELTA,
            spawn_attempts: 64,
            particles_enabled: true,
            particle_capacity: 512,
        }
    }
}

impl SessionConfig {
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            base_speed: settings.difficulty.base_speed(),
            particles_enabled: settings.particle_effects,
            ..Self::default()
        }
    }
}

fn interval_for(speed: u32) -> Duration {
    Duration::from_secs_f32(1.0 / speed.max(1) as f32)
}

/// Read-only view handed to rendering and UI each frame.
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub bounds: GridBounds,
    pub snake: &'a Snake,
    pub food: Option<Food>,
    pub power_ups: &'a [PowerUp],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a ParticleSystem,
    pub effects: &'a ActiveEffects,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed: u32,
    pub elapsed: f32,
    pub invincible: bool,
    pub death: Option<Collision>,
    /// Whether the last game over beat the previous best.
    pub new_record: bool,
}

pub struct GameSession {
    config: SessionConfig,
    rng: StdRng,
    spawner: Spawner,
    phase: Phase,
    snake: Snake,
    food: Option<Food>,
    power_ups: Vec<PowerUp>,
    obstacles: Vec<Obstacle>,
    particles: ParticleSystem,
    effects: ActiveEffects,
    score: u32,
    high_score: u32,
    level: u32,
    base_speed: u32,
    speed: u32,
    elapsed: f32,
    moves: u64,
    death: Option<Collision>,
    new_record: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates a session sitting on the menu with a fresh board behind it.
    pub fn new(config: SessionConfig, high_score: u32, rng: StdRng) -> Self {
        let snake = Snake::new(
            config.start,
            config.start_direction,
            config.initial_length,
            interval_for(config.base_speed),
        );
        let mut session = Self {
            spawner: Spawner::new(config.spawn_attempts),
            particles: ParticleSystem::with_capacity(config.particle_capacity),
            base_speed: config.base_speed,
            speed: config.base_speed,
            config,
            rng,
            phase: Phase::Menu,
            snake,
            food: None,
            power_ups: Vec::new(),
            obstacles: Vec::new(),
            effects: ActiveEffects::default(),
            score: 0,
            high_score,
            level: 1,
            elapsed: 0.0,
            moves: 0,
            death: None,
            new_record: false,
            events: Vec::new(),
        };
        session.reset();
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            bounds: self.config.bounds,
            snake: &self.snake,
            food: self.food,
            power_ups: &self.power_ups,
            obstacles: &self.obstacles,
            particles: &self.particles,
            effects: &self.effects,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            speed: self.speed,
            elapsed: self.elapsed,
            invincible: self.effects.is_active(TimedEffect::Invincibility),
            death: self.death,
            new_record: self.new_record,
        }
    }

    /// Hands over the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Puts a fresh board in place: snake, level-1 obstacles and food.
    pub fn reset(&mut self) {
        self.base_speed = self.config.base_speed;
        self.speed = self.base_speed;
        self.snake = Snake::new(
            self.config.start,
            self.config.start_direction,
            self.config.initial_length,
            interval_for(self.speed),
        );
        self.power_ups.clear();
        self.effects.clear();
        self.particles.clear();
        self.score = 0;
        self.level = 1;
        self.elapsed = 0.0;
        self.moves = 0;
        self.death = None;
        self.new_record = false;
        self.food = None;
        self.regenerate_obstacles();
        self.respawn_food();
    }

    /// Applies a discrete input to the phase state machine.
    pub fn handle_input(&mut self, input: GameInput) -> Flow {
        match (self.phase, input) {
            (_, GameInput::Quit) => return Flow::Exit,
            (Phase::Menu, GameInput::Confirm) => self.start(),
            (Phase::Menu | Phase::GameOver, GameInput::Back) => return Flow::Exit,
            (Phase::Playing, GameInput::Steer(direction)) => self.snake.set_direction(direction),
            (Phase::Playing, GameInput::Confirm | GameInput::TogglePause | GameInput::Back) => {
                self.phase = Phase::Paused;
            }
            (Phase::Paused, GameInput::Confirm | GameInput::TogglePause) => {
                self.phase = Phase::Playing;
            }
            (Phase::Paused, GameInput::Back) | (Phase::GameOver, GameInput::Confirm) => {
                self.phase = Phase::Menu;
            }
            (_, GameInput::Steer(_) | GameInput::TogglePause | GameInput::Confirm) => {}
        }
        Flow::Continue
    }

    fn start(&mut self) {
        self.reset();
        self.phase = Phase::Playing;
        self.events.push(GameEvent::Started);
        info!("new game started at speed {}", self.speed);
    }

    /// Advances the simulation by one frame.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.min(self.config.max_frame_delta);
        let seconds = dt.as_secs_f32();

        match self.phase {
            Phase::Playing => {
                self.elapsed += seconds;
                if self.snake.advance_timer(dt) {
                    self.movement_tick();
                }
                self.particles.update(seconds);
            }
            Phase::GameOver | Phase::Menu => self.particles.update(seconds),
            Phase::Paused => {}
        }
    }

    fn movement_tick(&mut self) {
        self.moves += 1;
        self.tick_effects();
        self.maybe_spawn_power_up();

        let now = self.elapsed;
        let lifetime = self.config.power_up_lifetime;
        self.power_ups.retain(|power_up| power_up.age(now) < lifetime);

        if self.food.is_none() {
            self.respawn_food();
        }

        let mut head = self.snake.peek_step().head;
        if let Some(hit) =
            collision::classify(head, &self.snake, &self.obstacles, self.config.bounds)
        {
            if !self.effects.is_active(TimedEffect::Invincibility) {
                self.game_over(hit);
                return;
            }
            if hit == Collision::Wall {
                head = self.config.bounds.wrap(head);
            }
        }

        let ate_food = self.food.is_some_and(|food| food.position == head);
        if ate_food {
            self.snake.grow();
        }
        self.snake.commit(head);

        if ate_food {
            self.eat_food(head);
        }

        if let Some(index) = self.power_ups.iter().position(|p| p.position == head) {
            let power_up = self.power_ups.swap_remove(index);
            self.collect_power_up(power_up);
        }
    }

    fn tick_effects(&mut self) {
        for effect in self.effects.tick() {
            match effect {
                TimedEffect::SpeedBoost | TimedEffect::SlowDown => self.set_speed(self.base_speed),
                TimedEffect::Invincibility | TimedEffect::DoublePoints => {}
            }
            debug!("{} wore off", effect.label());
        }
    }

    fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
        self.snake.set_move_interval(interval_for(speed));
    }

    fn eat_food(&mut self, at: Position) {
        let mut points = self.config.food_points;
        if self.effects.is_active(TimedEffect::DoublePoints) {
            points *= 2;
        }
        self.food = None;
        self.respawn_food();
        self.burst(at, Tint::Food, EmitParams::food());
        self.events.push(GameEvent::FoodEaten { at, points });
        self.award(points);
    }

    fn collect_power_up(&mut self, power_up: PowerUp) {
        let kind = power_up.kind;
        match kind {
            PowerUpKind::SpeedBoost => {
                self.set_speed((self.speed + 3).min(self.config.max_speed));
            }
            PowerUpKind::SlowDown => {
                self.set_speed(self.speed.saturating_sub(2).max(self.config.min_speed));
            }
            PowerUpKind::Grow => self.snake.grow_by(3),
            PowerUpKind::Shrink => {
                if self.snake.len() > 3 {
                    self.snake.shrink(2);
                }
            }
            PowerUpKind::Invincibility | PowerUpKind::DoublePoints => {}
        }
        if let Some(effect) = kind.timed_effect() {
            self.effects.start(effect, self.config.effect_ticks);
        }

        self.burst(power_up.position, Tint::PowerUp(kind), EmitParams::power_up());
        self.events.push(GameEvent::PowerUpCollected {
            at: power_up.position,
            kind,
        });
        debug!("collected {}", kind.label());
        self.award(self.config.power_up_bonus);
    }

    fn award(&mut self, points: u32) {
        self.score += points;
        if self.score / self.config.level_threshold > self.level - 1 {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.base_speed = (self.base_speed + 1).min(self.config.max_base_speed);
        self.set_speed(self.base_speed);
        self.regenerate_obstacles();

        if self.config.particles_enabled {
            let center = self.config.bounds.center();
            self.particles
                .emit_celebration(center, &EmitParams::celebration(), &mut self.rng);
        }
        self.events.push(GameEvent::LevelUp { level: self.level });
        info!("level {} reached, speed {}", self.level, self.speed);
    }

    fn game_over(&mut self, cause: Collision) {
        self.phase = Phase::GameOver;
        self.death = Some(cause);
        let at = self.snake.head();

        self.new_record = self.score > self.high_score;
        if self.new_record {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
        self.burst(at, Tint::Death, EmitParams::death());
        self.events.push(GameEvent::SnakeDied {
            at,
            cause,
            score: self.score,
        });
        info!(
            "Game Over! {:?} collision, final score {} (level {})",
            cause, self.score, self.level
        );
    }

    fn burst(&mut self, at: Position, tint: Tint, params: EmitParams) {
        if self.config.particles_enabled {
            self.particles.emit(at.center(), tint, &params, &mut self.rng);
        }
    }

    fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::new();
        occupancy.extend(self.snake.segments().copied());
        occupancy.extend(self.obstacles.iter().flat_map(|o| o.cells()));
        occupancy.extend(self.food.map(|food| food.position));
        occupancy.extend(self.power_ups.iter().map(|p| p.position));
        occupancy
    }

    fn respawn_food(&mut self) {
        let occupancy = self.occupancy();
        self.food = self
            .spawner
            .spawn_cell(&mut self.rng, self.config.bounds, &occupancy)
            .map(|position| Food { position });
    }

    fn maybe_spawn_power_up(&mut self) {
        if self.power_ups.len() >= self.config.max_power_ups
            || !self.rng.random_bool(self.config.power_up_chance)
        {
            return;
        }
        let occupancy = self.occupancy();
        let kind = PowerUpKind::random(&mut self.rng);
        if let Some(position) =
            self.spawner
                .spawn_cell(&mut self.rng, self.config.bounds, &occupancy)
        {
            self.power_ups.push(PowerUp {
                position,
                kind,
                spawned_at: self.elapsed,
            });
        }
    }

    fn regenerate_obstacles(&mut self) {
        self.obstacles.clear();
        let mut occupancy = self.occupancy();

        let direction = self.snake.pending_direction();
        let mut cell = self.snake.head();
        for _ in 0..HEAD_CLEARANCE {
            cell = cell.step(direction);
            occupancy.insert(cell);
        }

        self.obstacles = generate_obstacles(
            &mut self.rng,
            self.config.bounds,
            self.level,
            &mut occupancy,
            &self.spawner,
        );
    }
}
