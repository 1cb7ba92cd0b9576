// src/heightfield/grid.rs

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use super::cells::{CellId, CellTable, OutOfBounds};

/// Construction-time failures. Once a field is built nothing else in this
/// module can fail except queries landing off the edge, which have their own
/// error type ([`OutOfBounds`]).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("terrain needs at least 1x1 cells (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("cell spacing must be positive and finite (got {0})")]
    InvalidSpacing(f32),
    #[error("expected {expected} elevation samples for the vertex grid, got {got}")]
    SampleCountMismatch { expected: usize, got: usize },
}

/// Axis-aligned rectangle in the ground plane. `left`/`right` bound x,
/// `top`/`bottom` bound z (top is the smaller z, as on a map viewed from
/// above).
///
/// Containment is half-open: the left/top edges are inside, the right/bottom
/// edges are not, so adjacent rectangles never both claim a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundRect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl GroundRect {
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.left && x < self.right && z >= self.top && z < self.bottom
    }

    /// The same rectangle pulled in by `margin` on every side. Agents steer
    /// against a shrunk boundary so they turn before reaching the true edge.
    pub fn shrunk(&self, margin: f32) -> GroundRect {
        GroundRect {
            top: self.top + margin,
            bottom: self.bottom - margin,
            left: self.left + margin,
            right: self.right - margin,
        }
    }
}

/// The heightfield itself: a `(width+1) x (height+1)` grid of sample points
/// spanning `width x height` cells, centered on the world origin.
///
/// Built once at startup and never mutated, so every system can read it
/// concurrently through `Res<HeightField>`.
#[derive(Resource)]
pub struct HeightField {
    /// Vertex positions, row-major with x fastest: `index = j * (width + 1) + i`.
    samples: Vec<Vec3>,
    /// Cells along x.
    width: u32,
    /// Cells along z.
    height: u32,
    cell_spacing: f32,
    vertical_scale: f32,
    /// Half the world extent per axis; vertex `(0, 0)` sits at
    /// `(-half_extents.x, -half_extents.y)` in the ground plane.
    half_extents: Vec2,
    boundary: GroundRect,
    cells: CellTable,
}

impl HeightField {
    /// Build a field whose raw elevations are drawn uniformly from
    /// `elevation_range` and then scaled by `vertical_scale`. The random
    /// source is injected so callers control seeding; everything else about
    /// the geometry is deterministic.
    pub fn generate(
        width: u32,
        height: u32,
        vertical_scale: f32,
        cell_spacing: f32,
        elevation_range: (f32, f32),
        rng: &mut impl Rng,
    ) -> Result<Self, TerrainError> {
        let (lo, hi) = elevation_range;
        let count = (width as usize + 1) * (height as usize + 1);
        // An empty or inverted range degenerates to a constant elevation.
        let elevations = (0..count)
            .map(|_| if hi > lo { rng.random_range(lo..hi) } else { lo })
            .collect();
        Self::from_elevations(width, height, vertical_scale, cell_spacing, elevations)
    }

    /// Build a field from explicit raw elevations (row-major, x fastest),
    /// each still scaled by `vertical_scale`. Used by presets and tests.
    pub fn from_elevations(
        width: u32,
        height: u32,
        vertical_scale: f32,
        cell_spacing: f32,
        elevations: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        if !(cell_spacing.is_finite() && cell_spacing > 0.0) {
            return Err(TerrainError::InvalidSpacing(cell_spacing));
        }
        let expected = (width as usize + 1) * (height as usize + 1);
        if elevations.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                got: elevations.len(),
            });
        }

        let half_extents = Vec2::new(width as f32, height as f32) * cell_spacing * 0.5;
        let boundary = GroundRect {
            top: -half_extents.y,
            bottom: half_extents.y,
            left: -half_extents.x,
            right: half_extents.x,
        };

        let mut samples = Vec::with_capacity(expected);
        for j in 0..=height {
            for i in 0..=width {
                let k = (j * (width + 1) + i) as usize;
                samples.push(Vec3::new(
                    i as f32 * cell_spacing - half_extents.x,
                    elevations[k] * vertical_scale,
                    j as f32 * cell_spacing - half_extents.y,
                ));
            }
        }

        Ok(Self {
            samples,
            width,
            height,
            cell_spacing,
            vertical_scale,
            half_extents,
            boundary,
            cells: CellTable::build(width, height, cell_spacing, half_extents),
        })
    }

    /// Cells along x.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cells along z.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    #[inline]
    pub fn vertical_scale(&self) -> f32 {
        self.vertical_scale
    }

    /// Half the world extent per axis (x, z).
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// The outer edge of the terrain. Positions outside it fail to locate.
    #[inline]
    pub fn boundary(&self) -> GroundRect {
        self.boundary
    }

    /// Sample position at vertex `(i, j)`. Valid for `i <= width` and
    /// `j <= height`; cell corner lookups from a located cell never leave
    /// that range.
    #[inline]
    pub fn vertex(&self, i: u32, j: u32) -> Vec3 {
        self.samples[(j * (self.width + 1) + i) as usize]
    }

    /// All vertices with their grid coordinates, row-major with x fastest.
    /// The mesh builder relies on this order matching `vertex_index`.
    pub fn vertices(&self) -> impl Iterator<Item = ((u32, u32), Vec3)> + '_ {
        let vw = self.width + 1;
        self.samples
            .iter()
            .enumerate()
            .map(move |(k, &v)| ((k as u32 % vw, k as u32 / vw), v))
    }

    /// Flat index of vertex `(i, j)` in the row-major vertex order.
    #[inline]
    pub fn vertex_index(&self, i: u32, j: u32) -> u32 {
        j * (self.width + 1) + i
    }

    pub fn cells(&self) -> &CellTable {
        &self.cells
    }

    /// Map a ground position to the cell under it. See [`CellTable::locate`]
    /// for the edge rules.
    #[inline]
    pub fn locate(&self, x: f32, z: f32) -> Result<CellId, OutOfBounds> {
        self.cells.locate(x, z)
    }

    /// World-space rectangle of a cell.
    #[inline]
    pub fn cell_bounds(&self, cell: CellId) -> GroundRect {
        self.cells.bounds(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = HeightField::generate(0, 4, 1.0, 5.0, (0.0, 20.0), &mut rng(1));
        assert_eq!(
            err.unwrap_err(),
            TerrainError::InvalidDimensions { width: 0, height: 4 }
        );

        let err = HeightField::generate(4, 0, 1.0, 5.0, (0.0, 20.0), &mut rng(1));
        assert_eq!(
            err.unwrap_err(),
            TerrainError::InvalidDimensions { width: 4, height: 0 }
        );
    }

    #[test]
    fn rejects_bad_spacing() {
        for bad in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let r = HeightField::generate(4, 4, 1.0, bad, (0.0, 20.0), &mut rng(1));
            assert!(matches!(r, Err(TerrainError::InvalidSpacing(_))), "spacing {bad}");
        }
    }

    #[test]
    fn rejects_wrong_sample_count() {
        let err = HeightField::from_elevations(2, 2, 1.0, 1.0, vec![0.0; 8]);
        assert_eq!(
            err.unwrap_err(),
            TerrainError::SampleCountMismatch { expected: 9, got: 8 }
        );
    }

    #[test]
    fn grid_is_centered_on_the_origin() {
        let field = HeightField::generate(4, 4, 1.0, 5.0, (0.0, 20.0), &mut rng(7)).unwrap();

        assert_eq!(field.half_extents(), Vec2::splat(10.0));
        let v00 = field.vertex(0, 0);
        assert_eq!((v00.x, v00.z), (-10.0, -10.0));
        let v44 = field.vertex(4, 4);
        assert_eq!((v44.x, v44.z), (10.0, 10.0));
        // One cell over in x only.
        let v10 = field.vertex(1, 0);
        assert_eq!((v10.x, v10.z), (-5.0, -10.0));
    }

    #[test]
    fn non_square_grids_center_each_axis() {
        let field = HeightField::generate(2, 6, 1.0, 1.0, (0.0, 1.0), &mut rng(7)).unwrap();
        assert_eq!(field.half_extents(), Vec2::new(1.0, 3.0));
        let far = field.vertex(2, 6);
        assert_eq!((far.x, far.z), (1.0, 3.0));
    }

    #[test]
    fn elevations_respect_range_and_scale() {
        let scale = 0.4;
        let field = HeightField::generate(8, 8, scale, 1.0, (0.0, 20.0), &mut rng(99)).unwrap();
        for (_, v) in field.vertices() {
            assert!(v.y >= 0.0 && v.y < 20.0 * scale, "elevation {} out of range", v.y);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_terrain() {
        let a = HeightField::generate(6, 6, 0.4, 2.0, (0.0, 20.0), &mut rng(2018)).unwrap();
        let b = HeightField::generate(6, 6, 0.4, 2.0, (0.0, 20.0), &mut rng(2018)).unwrap();
        for ((_, va), (_, vb)) in a.vertices().zip(b.vertices()) {
            assert_eq!(va, vb);
        }
    }

    #[test]
    fn degenerate_elevation_range_is_constant() {
        let field = HeightField::generate(3, 3, 1.0, 1.0, (5.0, 5.0), &mut rng(1)).unwrap();
        for (_, v) in field.vertices() {
            assert_eq!(v.y, 5.0);
        }
    }

    #[test]
    fn boundary_contains_is_half_open() {
        let field = HeightField::generate(4, 4, 1.0, 5.0, (0.0, 1.0), &mut rng(1)).unwrap();
        let b = field.boundary();
        assert!(b.contains(-10.0, -10.0));
        assert!(b.contains(9.999, 9.999));
        assert!(!b.contains(10.0, 0.0));
        assert!(!b.contains(0.0, 10.0));
        assert!(!b.contains(-10.001, 0.0));
    }

    #[test]
    fn shrunk_pulls_every_side_in() {
        let rect = GroundRect { top: -10.0, bottom: 10.0, left: -10.0, right: 10.0 };
        let fence = rect.shrunk(2.5);
        assert_eq!(fence, GroundRect { top: -7.5, bottom: 7.5, left: -7.5, right: 7.5 });
        assert!(fence.contains(0.0, 0.0));
        assert!(!fence.contains(8.0, 0.0));
    }

    #[test]
    fn vertices_iterate_row_major() {
        let field = HeightField::generate(2, 2, 1.0, 1.0, (0.0, 1.0), &mut rng(3)).unwrap();
        let order: Vec<(u32, u32)> = field.vertices().map(|(ij, _)| ij).collect();
        assert_eq!(
            order,
            vec![
                (0, 0), (1, 0), (2, 0),
                (0, 1), (1, 1), (2, 1),
                (0, 2), (1, 2), (2, 2),
            ]
        );
        for ((i, j), v) in field.vertices() {
            assert_eq!(field.vertex(i, j), v);
            assert_eq!(field.vertex_index(i, j) as usize, (j * 3 + i) as usize);
        }
    }
}
