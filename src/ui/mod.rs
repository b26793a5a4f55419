//! UI plugin - HUD text, meters and the menu, pause and game over overlays.

use bevy::prelude::*;

use crate::ecosystem::{ActiveEcosystem, MAX_METER};
use crate::game::{
    Collision, EffectsText, GameOverUI, MenuUI, Meter, MeterFill, MeterLabel, PauseUI,
    ScoreText,
};
use crate::session::{ActiveSession, Phase};

const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);
const DIM_TEXT: Color = Color::srgba(0.8, 0.8, 0.8, 1.0);
const TITLE_COLOR: Color = Color::srgba(0.22, 1.0, 0.08, 1.0);
const ACCENT_COLOR: Color = Color::srgba(1.0, 1.0, 0.3, 1.0);
const METER_WIDTH: f32 = 200.0;

/// Plugin for HUD and overlay systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(
                Update,
                (sync_overlays, update_score_text, update_effects_text)
                    .chain()
                    .run_if(resource_exists::<ActiveSession>),
            )
            .add_systems(
                Update,
                (update_meters, sync_ecosystem_pause)
                    .chain()
                    .run_if(resource_exists::<ActiveEcosystem>),
            );
    }
}

fn label(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn spaced(bottom: f32) -> Node {
    Node {
        margin: UiRect::bottom(Val::Px(bottom)),
        ..default()
    }
}

fn full_screen_overlay() -> (Node, BackgroundColor) {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            ..default()
        },
        BackgroundColor(OVERLAY_BACKGROUND),
    )
}

/// Initial setup system - HUD text for whichever mode is running.
fn setup_hud(
    mut commands: Commands,
    session: Option<Res<ActiveSession>>,
    ecosystem: Option<Res<ActiveEcosystem>>,
) {
    let help = if session.is_some() {
        "Arrows/WASD steer  SPACE start/pause  P pause  ESC back  Q quit"
    } else {
        "Move the mouse to guide the snake, hold SPACE to accelerate  P pause  Q quit"
    };
    commands.spawn((
        label(help, 14.0, DIM_TEXT),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));

    if session.is_some() {
        commands.spawn((
            label("Score: 0", 20.0, Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                ..default()
            },
            ScoreText,
        ));
        commands.spawn((
            label("", 16.0, ACCENT_COLOR),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(40.0),
                left: Val::Px(10.0),
                ..default()
            },
            EffectsText,
        ));
    }

    if ecosystem.is_some() {
        spawn_meter(&mut commands, Meter::Energy, 10.0, Color::srgb(0.0, 0.6, 0.0));
        spawn_meter(&mut commands, Meter::Hunger, 40.0, Color::srgb(0.6, 0.3, 0.0));
        commands.spawn((
            label("Prey caught: 0", 20.0, Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(70.0),
                left: Val::Px(10.0),
                ..default()
            },
            ScoreText,
        ));
    }
}

fn spawn_meter(commands: &mut Commands, meter: Meter, top: f32, color: Color) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(top),
            left: Val::Px(10.0),
            align_items: AlignItems::Center,
            column_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(METER_WIDTH),
                        height: Val::Px(20.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.2)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        MeterFill(meter),
                    ));
                });
            parent.spawn((label("", 18.0, Color::WHITE), MeterLabel(meter)));
        });
}

fn spawn_start_menu(commands: &mut Commands, high_score: u32) {
    commands
        .spawn((full_screen_overlay(), MenuUI))
        .with_children(|parent| {
            parent.spawn((label("NEON SNAKE", 80.0, TITLE_COLOR), spaced(40.0)));
            parent.spawn((label("CONTROLS", 24.0, Color::WHITE), spaced(15.0)));
            for line in [
                "Arrow Keys or WASD to move",
                "Eat food to grow, grab power-ups for effects",
                "Avoid walls, obstacles and your own tail",
            ] {
                parent.spawn((label(line, 18.0, DIM_TEXT), spaced(10.0)));
            }
            parent.spawn((
                label(format!("High Score: {high_score}"), 22.0, Color::WHITE),
                spaced(30.0),
            ));
            parent.spawn(label("Press SPACE to start, ESC to quit", 24.0, ACCENT_COLOR));
        });
}

fn spawn_pause_screen<M: Component>(commands: &mut Commands, marker: M, hint: &str) {
    commands
        .spawn((full_screen_overlay(), marker))
        .with_children(|parent| {
            parent.spawn((label("PAUSED", 60.0, ACCENT_COLOR), spaced(20.0)));
            parent.spawn(label(hint, 20.0, DIM_TEXT));
        });
}

fn spawn_game_over_screen(
    commands: &mut Commands,
    score: u32,
    high_score: u32,
    new_record: bool,
    cause: Option<Collision>,
) {
    let reason = match cause {
        Some(Collision::Wall) => "You hit the wall",
        Some(Collision::SelfBody) => "You bit your own tail",
        Some(Collision::Obstacle) => "You crashed into an obstacle",
        None => "",
    };
    commands
        .spawn((full_screen_overlay(), GameOverUI))
        .with_children(|parent| {
            parent.spawn((
                label("GAME OVER", 60.0, Color::srgba(1.0, 0.3, 0.3, 1.0)),
                spaced(20.0),
            ));
            parent.spawn((label(reason, 20.0, DIM_TEXT), spaced(20.0)));
            parent.spawn((
                label(format!("Final Score: {score}"), 30.0, Color::WHITE),
                spaced(10.0),
            ));
            let best = if new_record {
                format!("New High Score: {high_score}!")
            } else {
                format!("High Score: {high_score}")
            };
            parent.spawn((label(best, 22.0, ACCENT_COLOR), spaced(30.0)));
            parent.spawn(label("Press SPACE for the menu, ESC to quit", 20.0, DIM_TEXT));
        });
}

type OverlayQuery<'w, 's> =
    Query<'w, 's, Entity, Or<(With<MenuUI>, With<PauseUI>, With<GameOverUI>)>>;

/// System to swap overlays whenever the session phase changes.
fn sync_overlays(
    mut commands: Commands,
    session: Res<ActiveSession>,
    overlays: OverlayQuery,
    mut shown: Local<Option<Phase>>,
) {
    let phase = session.phase();
    if *shown == Some(phase) {
        return;
    }
    *shown = Some(phase);

    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }
    match phase {
        Phase::Menu => spawn_start_menu(&mut commands, session.high_score()),
        Phase::Paused => spawn_pause_screen(
            &mut commands,
            PauseUI,
            "Press SPACE or P to resume, ESC for the menu",
        ),
        Phase::GameOver => {
            let snapshot = session.snapshot();
            spawn_game_over_screen(
                &mut commands,
                snapshot.score,
                snapshot.high_score,
                snapshot.new_record,
                snapshot.death,
            );
        }
        Phase::Playing => {}
    }
}

/// System to update the score display.
fn update_score_text(session: Res<ActiveSession>, mut query: Query<&mut Text, With<ScoreText>>) {
    let snapshot = session.snapshot();
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(format!(
            "Score: {}   High: {}   Level: {}   Speed: {}   Length: {}",
            snapshot.score,
            snapshot.high_score,
            snapshot.level,
            snapshot.speed,
            snapshot.snake.len()
        ));
    }
}

fn update_effects_text(session: Res<ActiveSession>, mut query: Query<&mut Text, With<EffectsText>>) {
    let snapshot = session.snapshot();
    let Ok(mut text) = query.single_mut() else {
        return;
    };
    let lines: Vec<String> = snapshot
        .effects
        .iter()
        .map(|(effect, ticks)| format!("{} ({ticks})", effect.label()))
        .collect();
    *text = Text::new(lines.join("\n"));
}

/// System to resize the ecosystem meter bars and labels.
fn update_meters(
    ecosystem: Res<ActiveEcosystem>,
    mut fills: Query<(&MeterFill, &mut Node)>,
    mut labels: Query<(&MeterLabel, &mut Text), Without<ScoreText>>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<MeterLabel>)>,
) {
    let value = |meter: Meter| match meter {
        Meter::Energy => ecosystem.energy(),
        Meter::Hunger => ecosystem.hunger(),
    };

    for (fill, mut node) in fills.iter_mut() {
        let percent = (value(fill.0) / MAX_METER * 100.0).clamp(0.0, 100.0);
        node.width = Val::Percent(percent);
    }
    for (meter_label, mut text) in labels.iter_mut() {
        let name = match meter_label.0 {
            Meter::Energy => "Energy",
            Meter::Hunger => "Hunger",
        };
        *text = Text::new(format!("{name}: {:.0}", value(meter_label.0)));
    }
    if let Ok(mut text) = score.single_mut() {
        *text = Text::new(format!("Prey caught: {}", ecosystem.prey_caught()));
    }
}

fn sync_ecosystem_pause(
    mut commands: Commands,
    ecosystem: Res<ActiveEcosystem>,
    overlays: Query<Entity, With<PauseUI>>,
) {
    match (ecosystem.is_paused(), overlays.is_empty()) {
        (true, true) => spawn_pause_screen(&mut commands, PauseUI, "Press P to resume"),
        (false, false) => {
            for entity in overlays.iter() {
                commands.entity(entity).despawn();
            }
        }
        _ => {}
    }
}
