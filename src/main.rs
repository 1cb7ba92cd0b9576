use bevy::prelude::*;

mod agent;
mod config;
mod heightfield;
mod input;
mod setup;
mod state;
mod terrain;
mod ui;

use agent::AgentPlugin;
use input::{camera_controller, pause_toggle};
use state::GameState;
use terrain::TerrainPlugin;
use ui::{despawn_pause_overlay, spawn_pause_overlay};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // world building + populations
        .add_plugins(TerrainPlugin)
        .add_plugins(AgentPlugin)
        .init_state::<GameState>()
        // camera + light
        .add_systems(Startup, setup::setup)
        // pause menu UI
        .add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
        .add_systems(OnExit(GameState::Paused), despawn_pause_overlay)
        // camera + pause toggle each frame
        .add_systems(Update, pause_toggle)
        .add_systems(Update, camera_controller.run_if(in_state(GameState::Running)))
        .run();
}
