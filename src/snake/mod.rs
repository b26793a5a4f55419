//! Snake models and the keyboard plugin that steers them.

mod body;
mod free_roam;

pub use body::{Snake, Step};
pub use free_roam::{FreeRoamSnake, FreeSegment, segment_width, wrap_angle};

use bevy::prelude::*;

use crate::game::{Direction, GameInput};

/// Plugin that turns key presses into [`GameInput`] messages.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameInput>()
            .add_systems(Update, keyboard_input);
    }
}

impl Direction {
    /// Reads the steering keys pressed this frame.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>) -> Option<Direction> {
        if keyboard_input.any_just_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
            Some(Direction::Left)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
            Some(Direction::Right)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
            Some(Direction::Up)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// System to read keyboard input and emit discrete game inputs.
fn keyboard_input(keyboard_input: Res<ButtonInput<KeyCode>>, mut inputs: MessageWriter<GameInput>) {
    if let Some(direction) = Direction::from_input(&keyboard_input) {
        inputs.write(GameInput::Steer(direction));
    }
    if keyboard_input.just_pressed(KeyCode::Space) {
        inputs.write(GameInput::Confirm);
    }
    if keyboard_input.just_pressed(KeyCode::KeyP) {
        inputs.write(GameInput::TogglePause);
    }
    if keyboard_input.just_pressed(KeyCode::Escape) {
        inputs.write(GameInput::Back);
    }
    if keyboard_input.just_pressed(KeyCode::KeyQ) {
        inputs.write(GameInput::Quit);
    }
}
