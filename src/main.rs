use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_vector_shapes::prelude::*;
use clap::Parser;
use rand::prelude::*;

use neon_snake::ecosystem::{ActiveEcosystem, Ecosystem, EcosystemPlugin};
use neon_snake::game::{
    ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE, GameMode, GameSettings, HIGH_SCORE_FILE, HighScoreFile,
    MAX_FRAME_DELTA, SETTINGS_FILE,
};
use neon_snake::rendering::RenderingPlugin;
use neon_snake::session::{ActiveSession, GameSession, SessionConfig, SessionPlugin};
use neon_snake::snake::SnakePlugin;
use neon_snake::storage::{HighScoreStore, Settings};
use neon_snake::ui::UiPlugin;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Neon grid snake and a free-roam snake ecosystem")]
struct Cli {
    /// Which game to play
    #[arg(long, value_enum, default_value_t = GameMode::Arcade)]
    mode: GameMode,

    /// File the high score is read from and written to
    #[arg(long, default_value = HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Optional key=value settings file
    #[arg(long, default_value = SETTINGS_FILE)]
    config_file: PathBuf,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

/// Routes panics through the log before the default report.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("fatal: {info}");
        default_hook(info);
    }));
}

fn main() -> AppExit {
    let cli = Cli::parse();
    install_panic_hook();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Neon Snake".to_string(),
            resolution: WindowResolution::new(
                (ARENA_WIDTH as f32 * CELL_SIZE + 80.0) as u32,
                (ARENA_HEIGHT as f32 * CELL_SIZE + 120.0) as u32,
            ),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(Shape2dPlugin::default());

    // Settings are read after the log plugin is up so fallbacks get reported.
    let settings = Settings::load(&cli.config_file);
    info!("starting in {:?} mode with {:?}", cli.mode, settings);

    app.insert_resource(Time::<Virtual>::from_max_delta(MAX_FRAME_DELTA))
        .insert_resource(GameSettings(settings.clone()));

    match cli.mode {
        GameMode::Arcade => {
            let store = HighScoreStore::new(cli.high_score_file);
            let high_score = store.load();
            let session = GameSession::new(SessionConfig::with_settings(&settings), high_score, rng);
            app.insert_resource(HighScoreFile(store))
                .insert_resource(ActiveSession(session))
                .add_plugins(SessionPlugin);
        }
        GameMode::Ecosystem => {
            let ecosystem = Ecosystem::new(rng, settings.particle_effects);
            app.insert_resource(ActiveEcosystem(ecosystem))
                .add_plugins(EcosystemPlugin);
        }
    }

    app.add_plugins((SnakePlugin, RenderingPlugin, UiPlugin)).run()
}
