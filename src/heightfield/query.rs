// src/heightfield/query.rs
//! Surface queries: which triangle lies under a position, and how far the
//! position sits above or below that triangle's plane.

use bevy::prelude::*;

use super::cells::{CellId, OutOfBounds};
use super::grid::HeightField;
use super::normals::oriented_face_normal;

impl HeightField {
    /// Signed perpendicular distance from `pos` to the plane of the cell
    /// triangle beneath it: positive above the surface, negative below,
    /// zero resting on it.
    pub fn height_delta(&self, pos: Vec3) -> Result<f32, OutOfBounds> {
        let cell = self.locate(pos.x, pos.z)?;
        let (normal, d) = self.triangle_plane(cell, pos.x, pos.z);
        Ok(normal.dot(pos) - d)
    }

    /// The vertical coordinate at which an entity at `pos` rests exactly on
    /// the surface: below the plane the correction lifts it up by the full
    /// distance, above the plane it pulls it down.
    pub fn surface_height(&self, pos: Vec3) -> Result<f32, OutOfBounds> {
        let delta = self.height_delta(pos)?;
        if delta <= 0.0 {
            Ok(pos.y + delta.abs())
        } else {
            Ok(pos.y - delta.abs())
        }
    }

    /// Plane (unit normal, offset) of the cell triangle containing `(x, z)`.
    ///
    /// Each cell splits along the diagonal from its south corner `(i, j+1)`
    /// to its east corner `(i+1, j)`; a half-plane test against that edge
    /// picks the northwest or southeast triangle. The mesh built in
    /// `crate::terrain::mesh` splits its quads the same way, so rendered
    /// faces and height queries always agree on which plane is underfoot.
    fn triangle_plane(&self, cell: CellId, x: f32, z: f32) -> (Vec3, f32) {
        let CellId { i, j } = cell;
        let south = self.vertex(i, j + 1);
        let east = self.vertex(i + 1, j);

        // Points exactly on the diagonal go to the southeast triangle; both
        // planes contain the diagonal, so the answer is the same either way.
        let (origin, a, b) = if northwest_of(south, east, x, z) {
            (self.vertex(i, j), south, east)
        } else {
            (self.vertex(i + 1, j + 1), east, south)
        };

        let normal = oriented_face_normal(origin, a, b).unwrap_or_else(|| {
            warn!("degenerate triangle in cell ({i}, {j}); treating it as level ground");
            Vec3::Y
        });
        (normal, normal.dot(origin))
    }
}

/// True when `(x, z)` lies strictly on the northwest side of the
/// ground-plane projection of the line `a -> b`.
#[inline]
fn northwest_of(a: Vec3, b: Vec3, x: f32, z: f32) -> bool {
    (b.x - a.x) * (z - a.z) - (b.z - a.z) * (x - a.x) < 0.0
}
