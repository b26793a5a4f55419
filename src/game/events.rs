//! Game events (messages).

use bevy::prelude::*;

use super::{Collision, Direction, Position};
use crate::items::PowerUpKind;

/// Discrete player intent, produced by the input systems.
#[derive(Message, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameInput {
    Steer(Direction),
    /// Start, restart or pause depending on the phase.
    Confirm,
    TogglePause,
    /// Step back one screen (pause, then menu, then quit).
    Back,
    Quit,
}

/// Something that happened inside a simulation tick.
///
/// The core queues these; the session plugin forwards them as messages for
/// persistence, camera effects and logging.
#[derive(Message, Clone, Copy, PartialEq, Debug)]
pub enum GameEvent {
    Started,
    FoodEaten { at: Position, points: u32 },
    PowerUpCollected { at: Position, kind: PowerUpKind },
    LevelUp { level: u32 },
    SnakeDied { at: Position, cause: Collision, score: u32 },
    NewHighScore { score: u32 },
    PreyCaught { at: Vec2 },
    /// The free-roam snake starved or ran out of energy and was reset.
    Exhausted { score: u32 },
}
