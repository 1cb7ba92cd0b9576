// src/state.rs
use bevy::prelude::*;

/// Running vs paused. Pausing freezes the simulation systems; rendering and
/// the pause toggle itself keep going.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Running,
    Paused,
}
