//! Game constants for arena size, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::{GridBounds, Position};

// Arena dimensions
pub const ARENA_WIDTH: i32 = 40;
pub const ARENA_HEIGHT: i32 = 30;
pub const ARENA: GridBounds = GridBounds::new(ARENA_WIDTH, ARENA_HEIGHT);

// Visual settings
pub const CELL_SIZE: f32 = 20.0;
pub const CORNER_RADIUS: f32 = 4.0;

// Timing
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(50);
/// Moves per second.
pub const BASE_SPEED: u32 = 8;
pub const MIN_SPEED: u32 = 3;
pub const MAX_SPEED: u32 = 20;
pub const MAX_BASE_SPEED: u32 = 15;
/// Movement ticks a timed power-up effect lasts.
pub const EFFECT_TICKS: u32 = 300;
/// Seconds a power-up stays on the board.
pub const POWER_UP_LIFETIME: f32 = 10.0;

// Scoring
pub const FOOD_POINTS: u32 = 10;
pub const POWER_UP_BONUS: u32 = 5;
pub const LEVEL_THRESHOLD: u32 = 100;

// Initial positions
pub const INITIAL_SNAKE_POSITION: Position = Position {
    x: ARENA_WIDTH / 2,
    y: ARENA_HEIGHT / 2,
};
pub const INITIAL_SNAKE_LENGTH: usize = 1;

// Files
pub const HIGH_SCORE_FILE: &str = "snake_highscore.txt";
pub const SETTINGS_FILE: &str = "snake_config.txt";

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgb(0.22, 1.0, 0.08);
pub const SNAKE_INVINCIBLE_COLOR: Color = Color::srgb(0.54, 0.17, 0.89);
pub const FOOD_COLOR: Color = Color::srgb(1.0, 0.08, 0.58);
pub const OBSTACLE_LINE_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);
pub const OBSTACLE_BOX_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
pub const OBSTACLE_CROSS_COLOR: Color = Color::srgb(0.0, 1.0, 1.0);
pub const OBSTACLE_CORNER_COLOR: Color = Color::srgb(1.0, 0.08, 0.58);
pub const GRID_LINE_COLOR: Color = Color::srgba(0.16, 0.16, 0.16, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.02, 0.02, 0.02, 1.0);
pub const ARENA_BORDER_COLOR: Color = Color::srgba(0.22, 1.0, 0.08, 0.6);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 1.0);
pub const DEATH_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const CELEBRATION_COLORS: [Color; 5] = [
    Color::srgb(0.22, 1.0, 0.08),
    Color::srgb(1.0, 0.08, 0.58),
    Color::srgb(0.12, 0.56, 1.0),
    Color::srgb(1.0, 1.0, 0.0),
    Color::srgb(1.0, 0.65, 0.0),
];
pub const PREY_COLORS: [Color; 3] = [
    Color::srgb(0.55, 0.27, 0.07),
    Color::srgb(0.63, 0.32, 0.18),
    Color::srgb(0.8, 0.52, 0.25),
];
pub const FREE_SNAKE_COLORS: [Color; 4] = [
    Color::srgb(0.06, 0.16, 0.06),
    Color::srgb(0.1, 0.24, 0.1),
    Color::srgb(0.16, 0.31, 0.16),
    Color::srgb(0.24, 0.39, 0.24),
];
pub const GRASS_COLOR: Color = Color::srgb(0.13, 0.23, 0.09);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_GRID: f32 = 0.5;
pub const Z_OBSTACLE: f32 = 0.8;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
pub const Z_PARTICLES: f32 = 3.0;
