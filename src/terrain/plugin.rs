// src/terrain/plugin.rs
use bevy::prelude::*;

use crate::terrain::systems::{load_world_settings, spawn_terrain};

/// Startup ordering so the terrain sees the settings file and populations
/// only spawn over ground that exists.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum WorldStartupSet {
    /// Settings file + world RNG.
    Settings,
    /// Heightfield, normals, ground mesh.
    Terrain,
    /// Everything that stands on the terrain.
    Population,
}

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app
            // --- Startup ordering ---
            .configure_sets(
                Startup,
                (
                    WorldStartupSet::Settings,
                    WorldStartupSet::Terrain.after(WorldStartupSet::Settings),
                    WorldStartupSet::Population.after(WorldStartupSet::Terrain),
                ),
            )
            .add_systems(Startup, load_world_settings.in_set(WorldStartupSet::Settings))
            .add_systems(Startup, spawn_terrain.in_set(WorldStartupSet::Terrain));
    }
}
