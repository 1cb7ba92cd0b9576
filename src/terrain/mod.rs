// src/terrain/mod.rs

mod mesh;
mod plugin;
mod systems;

pub use plugin::{TerrainPlugin, WorldStartupSet};
pub use systems::Terrain;
