//! Ecosystem plugin - free-roam snake steered by the pointer.

mod prey;
mod sim;

pub use prey::{MAX_FEAR, Prey, SIGHT_RADIUS};
pub use sim::{Ecosystem, MAX_METER};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::{GameEvent, GameInput};
use crate::session::Flow;

/// The running free-roam simulation.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveEcosystem(pub Ecosystem);

pub struct EcosystemPlugin;

impl Plugin for EcosystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameInput>()
            .add_message::<GameEvent>()
            .add_systems(
                Update,
                (apply_input, steer_with_pointer, advance_ecosystem)
                    .chain()
                    .run_if(resource_exists::<ActiveEcosystem>),
            );
    }
}

fn apply_input(
    mut inputs: MessageReader<GameInput>,
    mut ecosystem: ResMut<ActiveEcosystem>,
    mut exit: MessageWriter<AppExit>,
) {
    for input in inputs.read() {
        if ecosystem.handle_input(*input) == Flow::Exit {
            exit.write(AppExit::Success);
        }
    }
}

/// System to turn the snake toward the cursor and boost while Space is held.
fn steer_with_pointer(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut ecosystem: ResMut<ActiveEcosystem>,
) {
    ecosystem.set_boost(keyboard_input.pressed(KeyCode::Space));

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    if let Some(cursor) = window.cursor_position()
        && let Ok(target) = camera.viewport_to_world_2d(camera_transform, cursor)
    {
        ecosystem.steer_toward(target, time.delta());
    }
}

fn advance_ecosystem(
    time: Res<Time>,
    mut ecosystem: ResMut<ActiveEcosystem>,
    mut events: MessageWriter<GameEvent>,
) {
    ecosystem.update(time.delta());
    events.write_batch(ecosystem.drain_events());
}
