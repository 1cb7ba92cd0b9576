// src/heightfield/mod.rs
//! The terrain core: a centered grid of random elevation samples, per-vertex
//! normals for lighting, and O(1) surface-height queries for anything that
//! needs to stand on the ground.
//!
//! Everything here is plain data plus pure functions; the ECS wiring lives in
//! `crate::terrain` (meshing) and `crate::agent` (grounding).

mod cells;
mod grid;
mod normals;
mod query;

pub use cells::{CellId, CellTable, OutOfBounds};
pub use grid::{GroundRect, HeightField, TerrainError};
pub use normals::{NormalField, ShadingMode};
