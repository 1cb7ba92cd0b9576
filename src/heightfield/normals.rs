// src/heightfield/normals.rs
//! Per-vertex lighting normals derived from the sample grid.
//!
//! Every normal produced here is unit length and faces upward (`y >= 0`);
//! cross products that come out pointing down are flipped rather than left
//! to the luck of vertex ordering.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::grid::HeightField;

/// Which normal pass populated the field. Affects lighting only; elevations
/// and height queries never change with the mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingMode {
    /// One face normal per cell, replicated to the cell's origin vertex.
    /// Faceted look.
    Flat,
    /// Per-vertex average of the surrounding quadrant normals. Rounded look.
    #[default]
    Smooth,
}

/// One unit normal per grid vertex, stored in the same row-major layout as
/// the sample grid.
#[derive(Resource)]
pub struct NormalField {
    normals: Vec<Vec3>,
    /// Vertices per row, `width + 1`.
    vertex_width: u32,
    mode: ShadingMode,
}

impl NormalField {
    pub fn compute(field: &HeightField, mode: ShadingMode) -> Self {
        let vertex_width = field.width() + 1;
        let count = (vertex_width * (field.height() + 1)) as usize;
        let mut normals = vec![Vec3::Y; count];
        let mut degenerate = 0u32;

        match mode {
            ShadingMode::Flat => flat_pass(field, &mut normals, &mut degenerate),
            ShadingMode::Smooth => smooth_pass(field, &mut normals, &mut degenerate),
        }

        if degenerate > 0 {
            warn!("normal pass substituted +Y for {degenerate} degenerate cross products");
        }
        debug_assert!(
            normals.iter().all(|n| n.y >= 0.0),
            "every terrain normal must face upward"
        );

        Self { normals, vertex_width, mode }
    }

    #[inline]
    pub fn vertex(&self, i: u32, j: u32) -> Vec3 {
        self.normals[(j * self.vertex_width + i) as usize]
    }

    /// All normals in the sample grid's row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.normals.iter().copied()
    }

    pub fn mode(&self) -> ShadingMode {
        self.mode
    }
}

/// Unit normal of the triangle `(origin, a, b)`, flipped if needed so its
/// vertical component is non-negative. `None` when the edges are collinear
/// or zero length.
pub(crate) fn oriented_face_normal(origin: Vec3, a: Vec3, b: Vec3) -> Option<Vec3> {
    let n = (a - origin).cross(b - origin).try_normalize()?;
    Some(if n.y < 0.0 { -n } else { n })
}

/// One normal per cell, written to the cell's origin vertex. The far row and
/// column of vertices own no cell, so they reuse their nearest neighbor's
/// normal instead of keeping the +Y placeholder.
fn flat_pass(field: &HeightField, normals: &mut [Vec3], degenerate: &mut u32) {
    let (w, h) = (field.width(), field.height());
    let vw = w + 1;

    for j in 0..h {
        for i in 0..w {
            let n = oriented_face_normal(
                field.vertex(i, j),
                field.vertex(i + 1, j),
                field.vertex(i, j + 1),
            )
            .unwrap_or_else(|| {
                *degenerate += 1;
                Vec3::Y
            });
            normals[(j * vw + i) as usize] = n;
        }
    }

    for j in 0..h {
        normals[(j * vw + w) as usize] = normals[(j * vw + w - 1) as usize];
    }
    for i in 0..=w {
        normals[(h * vw + i) as usize] = normals[((h - 1) * vw + i) as usize];
    }
}

/// Blend the up-to-four quadrant normals around each vertex. Quadrants are
/// spanned by the orthogonal neighbors (north/east, east/south, south/west,
/// west/north); missing neighbors simply drop their quadrants, so edge
/// vertices blend two and corners keep exactly one.
fn smooth_pass(field: &HeightField, normals: &mut [Vec3], degenerate: &mut u32) {
    let (w, h) = (field.width(), field.height());
    let vw = w + 1;

    for j in 0..=h {
        for i in 0..=w {
            let origin = field.vertex(i, j);
            let north = (j > 0).then(|| field.vertex(i, j - 1));
            let south = (j < h).then(|| field.vertex(i, j + 1));
            let east = (i < w).then(|| field.vertex(i + 1, j));
            let west = (i > 0).then(|| field.vertex(i - 1, j));

            let mut sum = Vec3::ZERO;
            for (a, b) in [(north, east), (east, south), (south, west), (west, north)] {
                if let (Some(a), Some(b)) = (a, b) {
                    sum += oriented_face_normal(origin, a, b).unwrap_or_else(|| {
                        *degenerate += 1;
                        Vec3::Y
                    });
                }
            }
            // Upward-facing contributions cannot cancel to zero unless the
            // terrain is a wall of cliffs; fall back to +Y if they do.
            normals[(j * vw + i) as usize] = sum.try_normalize().unwrap_or(Vec3::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_field(width: u32, height: u32, elevation: f32) -> HeightField {
        let count = (width as usize + 1) * (height as usize + 1);
        HeightField::from_elevations(width, height, 1.0, 1.0, vec![elevation; count]).unwrap()
    }

    fn random_field(seed: u64) -> HeightField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        HeightField::generate(6, 6, 0.4, 1.0, (0.0, 20.0), &mut rng).unwrap()
    }

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn level_terrain_points_straight_up_in_both_modes() {
        let field = flat_field(4, 4, 7.0);
        for mode in [ShadingMode::Flat, ShadingMode::Smooth] {
            let nf = NormalField::compute(&field, mode);
            for j in 0..=4 {
                for i in 0..=4 {
                    assert_eq!(nf.vertex(i, j), Vec3::Y, "mode {mode:?} vertex ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn flat_normal_of_a_ramp_leans_against_the_slope() {
        // Elevation rises one unit per cell along x: the plane y = x + 1.
        let elevations = vec![
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
        ];
        let field = HeightField::from_elevations(2, 2, 1.0, 1.0, elevations).unwrap();
        let nf = NormalField::compute(&field, ShadingMode::Flat);

        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for j in 0..=2 {
            for i in 0..=2 {
                assert_close(nf.vertex(i, j), expected);
            }
        }
    }

    #[test]
    fn flat_far_edges_reuse_the_last_cells() {
        let field = random_field(11);
        let nf = NormalField::compute(&field, ShadingMode::Flat);
        let (w, h) = (field.width(), field.height());
        for j in 0..h {
            assert_eq!(nf.vertex(w, j), nf.vertex(w - 1, j));
        }
        for i in 0..=w {
            assert_eq!(nf.vertex(i, h), nf.vertex(i.min(w - 1), h - 1));
        }
    }

    #[test]
    fn normals_are_unit_length_and_face_upward() {
        let field = random_field(42);
        for mode in [ShadingMode::Flat, ShadingMode::Smooth] {
            let nf = NormalField::compute(&field, mode);
            for n in nf.iter() {
                assert!((n.length() - 1.0).abs() < 1e-4, "mode {mode:?}: |{n}| != 1");
                assert!(n.y >= 0.0, "mode {mode:?}: {n} faces down");
            }
        }
    }

    #[test]
    fn corner_vertex_blends_its_single_quadrant() {
        let field = random_field(5);
        let nf = NormalField::compute(&field, ShadingMode::Smooth);

        // (0, 0) has east and south neighbors only, so its normal is the
        // one quadrant normal unchanged.
        let expected = oriented_face_normal(
            field.vertex(0, 0),
            field.vertex(1, 0),
            field.vertex(0, 1),
        )
        .unwrap();
        assert_close(nf.vertex(0, 0), expected);
    }

    #[test]
    fn edge_vertex_blends_two_quadrants() {
        let field = random_field(5);
        let nf = NormalField::compute(&field, ShadingMode::Smooth);

        // (2, 0) sits on the north edge: east/south and south/west exist.
        let origin = field.vertex(2, 0);
        let east = field.vertex(3, 0);
        let south = field.vertex(2, 1);
        let west = field.vertex(1, 0);
        let expected = (oriented_face_normal(origin, east, south).unwrap()
            + oriented_face_normal(origin, south, west).unwrap())
        .normalize();
        assert_close(nf.vertex(2, 0), expected);
    }

    #[test]
    fn face_normal_is_flipped_upward() {
        // This vertex order yields a downward cross product raw.
        let n = oriented_face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert_eq!(n, Vec3::Y);
    }

    #[test]
    fn collinear_corners_have_no_normal() {
        let n = oriented_face_normal(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(n, None);
    }
}
