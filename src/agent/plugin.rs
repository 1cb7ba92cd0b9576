// src/agent/plugin.rs
use bevy::prelude::*;

use crate::agent::systems::{grounding, integrate_movement, predation, spawn_agents, wander};
use crate::state::GameState;
use crate::terrain::WorldStartupSet;

pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app
            // Populations spawn after the terrain they stand on exists
            .add_systems(Startup, spawn_agents.in_set(WorldStartupSet::Population))
            .add_systems(
                Update,
                (
                    wander.run_if(in_state(GameState::Running)),
                    integrate_movement.after(wander).run_if(in_state(GameState::Running)),
                    predation.after(integrate_movement).run_if(in_state(GameState::Running)),
                    grounding.after(predation).run_if(in_state(GameState::Running)),
                ),
            );
    }
}
