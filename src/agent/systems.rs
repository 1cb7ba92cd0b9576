// src/agent/systems.rs

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::agent::components::{Grounded, Mobility, Species};
use crate::config::{WorldRng, WorldSettings};
use crate::heightfield::HeightField;

/// How close to the boundary an agent may wander before it gets steered
/// back toward the interior.
pub const EDGE_MARGIN: f32 = 1.5;
/// Planar reach within which a predator consumes a snack.
pub const PREDATION_REACH: f32 = 0.75;

const WANDER_STEER: f32 = 0.6;
const WANDER_THRUST: f32 = 0.8;
const EDGE_STEER: f32 = 1.5;

/// Spawns the configured populations scattered over the terrain, one mesh
/// and material per species.
pub fn spawn_agents(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<HeightField>,
    settings: Res<WorldSettings>,
    mut rng: ResMut<WorldRng>,
) {
    let roster = [
        (Species::Predator, settings.predators),
        (Species::Prey, settings.prey),
        (Species::Snack, settings.snacks),
    ];

    for (species, population) in roster {
        let mesh = match species {
            Species::Predator => meshes.add(Cuboid::from_length(0.7)),
            Species::Prey => meshes.add(Capsule3d::new(0.3, 0.5)),
            Species::Snack => meshes.add(Sphere::new(0.3)),
        };
        let material = materials.add(StandardMaterial {
            base_color: species.color(),
            ..default()
        });

        for _ in 0..population {
            let spot = random_ground_spot(&field, &mut rng.0);
            let offset = species.grounded_offset();
            let ground = field
                .surface_height(Vec3::new(spot.x, 0.0, spot.y))
                .unwrap_or(0.0);

            let mut agent = commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(spot.x, ground + offset, spot.y),
                species,
                Grounded { offset },
            ));
            if let Some(mut mobility) = species.mobility() {
                mobility.heading = rng.0.random_range(0.0..TAU);
                agent.insert(mobility);
            }
        }
    }

    info!(
        "spawned {} predators, {} prey, {} snacks",
        settings.predators, settings.prey, settings.snacks
    );
}

/// A uniform random point inside the fenced interior of the terrain. Falls
/// back to the full boundary when the world is too small to hold the fence.
pub fn random_ground_spot(field: &HeightField, rng: &mut impl Rng) -> Vec2 {
    let outer = field.boundary();
    let fence = outer.shrunk(EDGE_MARGIN);
    let (left, right, top, bottom) = if fence.right > fence.left && fence.bottom > fence.top {
        (fence.left, fence.right, fence.top, fence.bottom)
    } else {
        (outer.left, outer.right, outer.top, outer.bottom)
    };
    Vec2::new(rng.random_range(left..right), rng.random_range(top..bottom))
}

/// Erratic roaming: a coin flip per tick for turn direction, another for
/// thrust, and a hard one-sided steer whenever the agent crosses the fence
/// line near the boundary. Runs on anything with [`Mobility`].
pub fn wander(
    field: Res<HeightField>,
    mut rng: ResMut<WorldRng>,
    mut agents: Query<(&mut Mobility, &Transform)>,
) {
    let fence = field.boundary().shrunk(EDGE_MARGIN);
    for (mut mobility, tf) in &mut agents {
        if rng.0.random_bool(0.5) {
            mobility.steer(WANDER_STEER);
        } else {
            mobility.steer(-WANDER_STEER);
        }
        if rng.0.random_bool(0.5) {
            mobility.thrust(WANDER_THRUST);
        }
        if !fence.contains(tf.translation.x, tf.translation.z) {
            mobility.steer(EDGE_STEER);
        }
    }
}

/// Integrates turn-and-thrust state into the transform: heading absorbs the
/// turn rate, the position advances along the heading, then friction decays
/// both channels.
pub fn integrate_movement(
    time: Res<Time>,
    mut agents: Query<(&mut Mobility, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut mobility, mut tf) in &mut agents {
        mobility.heading += mobility.turn * dt;
        let dir = Vec2::new(mobility.heading.cos(), mobility.heading.sin());
        let step = mobility.momentum * dt;
        tf.translation.x += dir.x * step;
        tf.translation.z += dir.y * step;

        // Per-tick decay, same channel treatment as the turn-and-thrust
        // model this comes from.
        let f = mobility.friction;
        mobility.turn *= f;
        mobility.momentum *= f;

        if mobility.momentum.abs() > 1e-3 {
            tf.look_to(Vec3::new(dir.x, 0.0, dir.y), Vec3::Y);
        }
    }
}

/// Predators eat snacks by planar proximity; an eaten snack reappears at a
/// fresh random spot. The grounding pass that follows settles its height.
pub fn predation(
    field: Res<HeightField>,
    mut rng: ResMut<WorldRng>,
    mut agents: Query<(&Species, &mut Transform)>,
) {
    let hunters: Vec<Vec2> = agents
        .iter()
        .filter(|(species, _)| **species == Species::Predator)
        .map(|(_, tf)| Vec2::new(tf.translation.x, tf.translation.z))
        .collect();
    if hunters.is_empty() {
        return;
    }

    for (species, mut tf) in &mut agents {
        if *species != Species::Snack {
            continue;
        }
        let here = Vec2::new(tf.translation.x, tf.translation.z);
        if hunters.iter().any(|h| h.distance(here) <= PREDATION_REACH) {
            let spot = random_ground_spot(&field, &mut rng.0);
            info!(
                "snack eaten at ({:.1}, {:.1}), respawning at ({:.1}, {:.1})",
                here.x, here.y, spot.x, spot.y
            );
            tf.translation = Vec3::new(spot.x, 0.0, spot.y);
        }
    }
}

/// Snaps every grounded entity to the surface under its feet. Off the edge
/// there is no surface, so the height stays as-is until the agent is back
/// inside the boundary.
pub fn grounding(field: Res<HeightField>, mut query: Query<(&Grounded, &mut Transform)>) {
    for (grounded, mut tf) in &mut query {
        let feet = tf.translation - Vec3::Y * grounded.offset;
        if let Ok(surface) = field.surface_height(feet) {
            tf.translation.y = surface + grounded.offset;
        }
    }
}
