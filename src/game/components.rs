//! ECS marker components for UI nodes.

use bevy::prelude::*;

/// Score, level and speed line of the HUD.
#[derive(Component)]
pub struct ScoreText;

/// List of running power-up effects.
#[derive(Component)]
pub struct EffectsText;

/// Root node of the start menu overlay.
#[derive(Component)]
pub struct MenuUI;

/// Root node of the pause overlay.
#[derive(Component)]
pub struct PauseUI;

/// Root node of the game over overlay.
#[derive(Component)]
pub struct GameOverUI;

/// Which ecosystem meter a bar shows.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Meter {
    Energy,
    Hunger,
}

/// Coloured fill of an ecosystem meter bar.
#[derive(Component)]
pub struct MeterFill(pub Meter);

/// Numeric label next to an ecosystem meter.
#[derive(Component)]
pub struct MeterLabel(pub Meter);
