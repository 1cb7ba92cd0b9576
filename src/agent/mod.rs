// src/agent/mod.rs

// these sub-modules stay private
mod components;
mod plugin;
mod systems;

// re-export what callers actually need:
pub use components::{Grounded, Mobility, Species};
pub use plugin::AgentPlugin;
