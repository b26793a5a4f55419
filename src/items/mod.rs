//! Things that sit on the grid besides the snake: food, power-ups and
//! obstacles, plus the spawner that places them.

mod obstacles;
mod spawner;

pub use obstacles::*;
pub use spawner::*;

use rand::prelude::*;

use crate::game::Position;

/// Regular food. Eating it grows the snake by one segment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Food {
    pub position: Position,
}

/// Kinds of power-up that can appear on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowDown,
    Grow,
    Shrink,
    Invincibility,
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowDown,
        PowerUpKind::Grow,
        PowerUpKind::Shrink,
        PowerUpKind::Invincibility,
        PowerUpKind::DoublePoints,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::SlowDown => "Slow Down",
            PowerUpKind::Grow => "Grow",
            PowerUpKind::Shrink => "Shrink",
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::DoublePoints => "Double Points",
        }
    }
}

/// A power-up lying on the board.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
    /// Session clock (seconds) at which it appeared.
    pub spawned_at: f32,
}

impl PowerUp {
    pub fn age(&self, now: f32) -> f32 {
        now - self.spawned_at
    }
}

/// Template an obstacle rectangle was generated from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObstaclePattern {
    Line,
    Box,
    Cross,
    Corner,
}

/// Axis-aligned block of wall cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Obstacle {
    pub origin: Position,
    pub width: i32,
    pub height: i32,
    pub pattern: ObstaclePattern,
}

impl Obstacle {
    pub fn new(origin: Position, width: i32, height: i32, pattern: ObstaclePattern) -> Self {
        Self {
            origin,
            width,
            height,
            pattern,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.origin.x
            && pos.x < self.origin.x + self.width
            && pos.y >= self.origin.y
            && pos.y < self.origin.y + self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width).map(move |dx| Position::new(self.origin.x + dx, self.origin.y + dy))
        })
    }
}
