// src/config.rs
//! Run settings loaded from `assets/world.ron`. A missing or malformed file
//! falls back to defaults that reproduce the classic 4x4 demo world.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::heightfield::ShadingMode;

pub const SETTINGS_PATH: &str = "assets/world.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read world settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse world settings: {0}")]
    Ron(String),
}

/// Everything tunable about a run. Inserted as a resource before the world
/// is built; systems read it, never write it.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Cells along x.
    pub grid_width: u32,
    /// Cells along z.
    pub grid_height: u32,
    /// World units per cell edge.
    pub cell_spacing: f32,
    /// Multiplier applied to raw elevation samples.
    pub vertical_scale: f32,
    /// Raw elevation range drawn per vertex, before `vertical_scale`.
    pub elevation_range: (f32, f32),
    pub shading: ShadingMode,
    /// Seed for all world randomness; the same seed reproduces the same run.
    pub seed: u64,
    pub predators: u32,
    pub prey: u32,
    pub snacks: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            grid_width: 4,
            grid_height: 4,
            cell_spacing: 5.0,
            vertical_scale: 0.4,
            elevation_range: (0.0, 20.0),
            shading: ShadingMode::Smooth,
            seed: 2018,
            predators: 2,
            prey: 6,
            snacks: 4,
        }
    }
}

impl WorldSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        ron::de::from_str(&text).map_err(|e| SettingsError::Ron(e.to_string()))
    }

    /// Load from disk, or fall back to defaults with a log line. A missing
    /// settings file is a normal first-run condition, not an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("using default world settings: {err}");
                Self::default()
            }
        }
    }
}

/// The single random stream behind terrain generation and agent behavior,
/// seeded from [`WorldSettings::seed`].
#[derive(Resource)]
pub struct WorldRng(pub ChaCha8Rng);

impl WorldRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_buildable_world() {
        let s = WorldSettings::default();
        assert!(s.grid_width > 0 && s.grid_height > 0);
        assert!(s.cell_spacing > 0.0);
        assert!(s.elevation_range.1 > s.elevation_range.0);
        assert!(s.predators + s.prey + s.snacks > 0);
    }

    #[test]
    fn settings_round_trip_through_ron() {
        let s = WorldSettings::default();
        let text = ron::ser::to_string(&s).unwrap();
        let back: WorldSettings = ron::de::from_str(&text).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn partial_files_keep_defaults_for_the_rest() {
        let s: WorldSettings = ron::de::from_str("(seed: 7, shading: Flat)").unwrap();
        assert_eq!(s.seed, 7);
        assert_eq!(s.shading, ShadingMode::Flat);
        assert_eq!(s.grid_width, WorldSettings::default().grid_width);
        assert_eq!(s.cell_spacing, WorldSettings::default().cell_spacing);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WorldSettings::load("no/such/world.ron").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert_eq!(WorldSettings::load_or_default("no/such/world.ron"), WorldSettings::default());
    }

    #[test]
    fn garbage_fails_to_parse() {
        assert!(ron::de::from_str::<WorldSettings>("(grid_width: \"many\")").is_err());
    }

    #[test]
    fn same_seed_yields_the_same_stream() {
        use rand::Rng;
        let mut a = WorldRng::from_seed(99);
        let mut b = WorldRng::from_seed(99);
        for _ in 0..8 {
            assert_eq!(a.0.random::<u64>(), b.0.random::<u64>());
        }
    }
}
