#![warn(missing_docs)]
//! Hex-grid survival board.
//!
//! A player token moves between adjacent cells of a hexagonal grid. Each
//! cell's value adjusts health on entry, cells decay after the player leaves
//! them, and rare special cells reset the whole board on first contact.

mod game;
pub mod math;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use game::{GameConfig, GamePlugin};

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum AppState {
    /// Normal play — board input active.
    #[default]
    Playing,
    /// Death notice up; board input halted until acknowledged.
    Dead,
    /// Debug inspector active (Tab to toggle).
    Inspecting,
}

/// CLI overrides for the default configuration.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Hex-grid survival board")]
struct Cli {
    /// Board radius in hex rings around the origin.
    #[arg(long)]
    radius: Option<u32>,
    /// Health at game start and after each respawn.
    #[arg(long)]
    start_health: Option<i32>,
    /// Fixed RNG seed for a reproducible board.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    #[allow(unused_mut)]
    let mut config = GameConfig::default();

    #[cfg(feature = "native")]
    {
        use clap::Parser;
        let cli = Cli::parse();
        if let Some(radius) = cli.radius {
            config.board.radius = radius;
        }
        if let Some(start_health) = cli.start_health {
            config.rules.start_health = start_health;
        }
        config.seed = cli.seed;
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hexfall".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<AppState>()
    .init_state::<AppState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(GamePlugin(config))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(AppState::Inspecting)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next: ResMut<NextState<AppState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        match state.get() {
            AppState::Playing => next.set(AppState::Inspecting),
            AppState::Inspecting => next.set(AppState::Playing),
            // The death notice handles its own input.
            AppState::Dead => {}
        }
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
