// src/terrain/systems.rs

use bevy::prelude::*;

use crate::config::{WorldRng, WorldSettings, SETTINGS_PATH};
use crate::heightfield::{HeightField, NormalField};
use crate::terrain::mesh::build_terrain_mesh;

/// Marker for the terrain surface entity.
#[derive(Component)]
pub struct Terrain;

/// 1) Read `assets/world.ron` (or fall back to defaults) and seed the world
///    random stream from it.
pub fn load_world_settings(mut commands: Commands) {
    let settings = WorldSettings::load_or_default(SETTINGS_PATH);
    info!(
        "world: {}x{} cells at spacing {}, shading {:?}, seed {}",
        settings.grid_width,
        settings.grid_height,
        settings.cell_spacing,
        settings.shading,
        settings.seed
    );
    commands.insert_resource(WorldRng::from_seed(settings.seed));
    commands.insert_resource(settings);
}

/// 2) Generate the heightfield and its normals, spawn the ground mesh, and
///    publish both fields as resources for everything that stands on them.
pub fn spawn_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<WorldSettings>,
    mut rng: ResMut<WorldRng>,
) {
    let field = HeightField::generate(
        settings.grid_width,
        settings.grid_height,
        settings.vertical_scale,
        settings.cell_spacing,
        settings.elevation_range,
        &mut rng.0,
    )
    .unwrap_or_else(|err| {
        error!("world settings rejected ({err}); building the default terrain instead");
        let d = WorldSettings::default();
        HeightField::generate(
            d.grid_width,
            d.grid_height,
            d.vertical_scale,
            d.cell_spacing,
            d.elevation_range,
            &mut rng.0,
        )
        .expect("default settings describe a valid terrain")
    });
    let normals = NormalField::compute(&field, settings.shading);

    let mesh = meshes.add(build_terrain_mesh(&field, &normals));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(94, 137, 62),
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        Terrain,
    ));

    commands.insert_resource(normals);
    commands.insert_resource(field);
}
