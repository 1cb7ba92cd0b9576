// src/heightfield/cells.rs
//! Position-to-cell resolution and the precomputed per-cell bounds table.

use bevy::prelude::*;
use thiserror::Error;

use super::grid::GroundRect;

/// A planar position fell outside the terrain. Recoverable: the caller
/// decides whether to skip the correction, steer back, or stop.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("position ({x:.2}, {z:.2}) is outside the terrain boundary")]
pub struct OutOfBounds {
    pub x: f32,
    pub z: f32,
}

/// One grid cell; `i` counts along x, `j` along z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellId {
    pub i: u32,
    pub j: u32,
}

/// World-space rectangles for every cell, plus the arithmetic mapping a
/// ground position back to the cell containing it.
pub struct CellTable {
    /// Row-major, i fastest: `index = j * width + i`.
    rects: Vec<GroundRect>,
    width: u32,
    height: u32,
    half_extents: Vec2,
}

impl CellTable {
    pub(super) fn build(width: u32, height: u32, cell_spacing: f32, half_extents: Vec2) -> Self {
        let mut rects = Vec::with_capacity((width * height) as usize);
        for j in 0..height {
            for i in 0..width {
                rects.push(GroundRect {
                    top: j as f32 * cell_spacing - half_extents.y,
                    bottom: (j + 1) as f32 * cell_spacing - half_extents.y,
                    left: i as f32 * cell_spacing - half_extents.x,
                    right: (i + 1) as f32 * cell_spacing - half_extents.x,
                });
            }
        }
        Self { rects, width, height, half_extents }
    }

    /// World-space rectangle of cell `(i, j)`.
    ///
    /// Panics on an out-of-range id; ids produced by [`CellTable::locate`]
    /// are always in range.
    #[inline]
    pub fn bounds(&self, cell: CellId) -> GroundRect {
        self.rects[(cell.j * self.width + cell.i) as usize]
    }

    /// Map a ground position to the cell containing it.
    ///
    /// The grid covers the half-open span `[-half_extent, +half_extent)` per
    /// axis: the west/north edges belong to the first row and column of
    /// cells, the east/south edges are already outside. A computed index
    /// past the last cell is reported as [`OutOfBounds`] rather than
    /// clamped, so the far edges can never index one past the end of the
    /// sample grid.
    pub fn locate(&self, x: f32, z: f32) -> Result<CellId, OutOfBounds> {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        let i = ((x / self.half_extents.x) * half_w + half_w).floor();
        let j = ((z / self.half_extents.y) * half_h + half_h).floor();
        // NaN and infinite inputs fail both comparisons and fall through.
        if i >= 0.0 && i < self.width as f32 && j >= 0.0 && j < self.height as f32 {
            Ok(CellId { i: i as u32, j: j as u32 })
        } else {
            Err(OutOfBounds { x, z })
        }
    }
}
