//! Game resources (singleton state).

use bevy::prelude::*;
use clap::ValueEnum;

use crate::storage::{HighScoreStore, Settings};

/// Which game the app was launched with.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GameMode {
    /// Neon grid snake with power-ups and obstacles.
    #[default]
    Arcade,
    /// Free-roam snake hunting prey.
    Ecosystem,
}

/// Settings loaded at startup.
#[derive(Resource, Deref, Clone, Debug, Default)]
pub struct GameSettings(pub Settings);

/// Where the high score is persisted.
#[derive(Resource, Deref, Clone, Debug)]
pub struct HighScoreFile(pub HighScoreStore);

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl CameraShake {
    pub fn start(&mut self, seconds: f32, intensity: f32) {
        self.timer = Timer::from_seconds(seconds, TimerMode::Once);
        self.intensity = intensity;
    }

    pub fn is_active(&self) -> bool {
        !self.timer.is_finished()
    }
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
