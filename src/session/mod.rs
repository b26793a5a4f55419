//! Session plugin - owns the arcade game session and bridges it to Bevy.

mod effects;
mod state;

pub use effects::{ActiveEffects, TimedEffect};
pub use state::{Flow, GameSession, Phase, SessionConfig, Snapshot};

use bevy::prelude::*;

use crate::game::{GameEvent, GameInput, HighScoreFile};

/// The running arcade session.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub GameSession);

/// Plugin that drives an [`ActiveSession`] from input messages and frame time.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameInput>()
            .add_message::<GameEvent>()
            .add_systems(
                Update,
                (apply_input, advance_session, persist_high_score)
                    .chain()
                    .run_if(resource_exists::<ActiveSession>),
            );
    }
}

/// System to feed player input into the session state machine.
fn apply_input(
    mut inputs: MessageReader<GameInput>,
    mut session: ResMut<ActiveSession>,
    mut exit: MessageWriter<AppExit>,
) {
    for input in inputs.read() {
        if session.handle_input(*input) == Flow::Exit {
            info!("quitting with high score {}", session.high_score());
            exit.write(AppExit::Success);
        }
    }
}

/// System to advance the simulation and publish what happened.
fn advance_session(
    time: Res<Time>,
    mut session: ResMut<ActiveSession>,
    mut events: MessageWriter<GameEvent>,
) {
    session.update(time.delta());
    events.write_batch(session.drain_events());
}

/// System to write beaten high scores to disk.
fn persist_high_score(mut events: MessageReader<GameEvent>, store: Option<Res<HighScoreFile>>) {
    let Some(store) = store else {
        return;
    };
    for event in events.read() {
        if let GameEvent::NewHighScore { score } = *event {
            match store.save(score) {
                Ok(()) => info!("new high score {score} saved to {}", store.path().display()),
                Err(err) => error!("{err}"),
            }
        }
    }
}
