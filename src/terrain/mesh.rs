// src/terrain/mesh.rs

use bevy::prelude::*;
use bevy::render::mesh::{Indices, Mesh};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

use crate::heightfield::{HeightField, NormalField};

/// Builds the ground mesh: one vertex per grid sample, two triangles per
/// cell, split along the same south-to-east diagonal the surface queries
/// use, so the rendered faces and the height math never disagree about
/// which plane is underfoot.
pub fn build_terrain_mesh(field: &HeightField, normals: &NormalField) -> Mesh {
    let (w, h) = (field.width(), field.height());
    let verts_x = w + 1;
    let count = (verts_x * (h + 1)) as usize;

    // 1) Positions & UVs in the grid's row-major vertex order
    let mut positions = Vec::with_capacity(count);
    let mut uvs = Vec::with_capacity(count);
    for ((i, j), v) in field.vertices() {
        positions.push([v.x, v.y, v.z]);
        uvs.push([i as f32 / w as f32, j as f32 / h as f32]);
    }
    let normals: Vec<[f32; 3]> = normals.iter().map(|n| [n.x, n.y, n.z]).collect();

    // 2) Indices (two tris per cell)
    let mut indices = Vec::with_capacity((w * h * 6) as usize);
    for j in 0..h {
        for i in 0..w {
            let a = j * verts_x + i;
            let c = a + verts_x;
            indices.extend_from_slice(&[a, c, a + 1, a + 1, c, c + 1]);
        }
    }

    // 3) Assemble the mesh
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
