// src/input.rs

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::{keyboard::KeyCode, mouse::MouseMotion, ButtonInput};
use bevy::prelude::*;

use crate::heightfield::HeightField;
use crate::setup::MainCamera;
use crate::state::GameState;

pub const MOVE_SPEED: f32 = 12.0;
pub const ROTATE_SPEED: f32 = 0.2;
pub const MAX_CAMERA_DT: f32 = 0.05; // never use a dt larger than 50ms

/// Keeps the camera floor slightly above the surface under it.
const CAMERA_CLEARANCE: f32 = 1.5;

#[derive(Component)]
pub struct CameraOrbit {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

pub fn pause_toggle(
    keys: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::Running => {
                next_state.set(GameState::Paused);
                info!("paused");
            }
            GameState::Paused => {
                next_state.set(GameState::Running);
                info!("resumed");
            }
        }
    }
}

pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    field: Res<HeightField>,
    mut query: Query<(&mut Transform, &mut CameraOrbit), With<MainCamera>>,
) {
    // 0) Clamp delta
    let mut dt = time.delta_secs();
    if dt > MAX_CAMERA_DT {
        dt = MAX_CAMERA_DT;
    }

    let Ok((mut tf, mut orbit)) = query.single_mut() else {
        return;
    };

    // 1) Camera-relative WASD pan, fenced to the terrain
    let forward = Vec2::new(-orbit.yaw.cos(), -orbit.yaw.sin());
    let right = Vec2::new(-forward.y, forward.x);

    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        dir += forward;
    }
    if keys.pressed(KeyCode::KeyS) {
        dir -= forward;
    }
    if keys.pressed(KeyCode::KeyA) {
        dir -= right;
    }
    if keys.pressed(KeyCode::KeyD) {
        dir += right;
    }

    if dir != Vec2::ZERO {
        let delta = dir.normalize() * MOVE_SPEED * dt;
        orbit.focus.x += delta.x;
        orbit.focus.z += delta.y;
    }
    let fence = field.boundary().shrunk(0.01);
    orbit.focus.x = orbit.focus.x.clamp(fence.left, fence.right);
    orbit.focus.z = orbit.focus.z.clamp(fence.top, fence.bottom);

    // 2) Ground the focus Y
    if let Ok(surface) = field.surface_height(orbit.focus) {
        orbit.focus.y = surface;
    }

    // 3) Zoom
    for ev in scroll_evr.read() {
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.02,
        };
        orbit.radius = (orbit.radius - amount).clamp(2.0, 100.0);
    }

    // 4) Orbit
    if mouse_buttons.pressed(MouseButton::Middle) {
        for ev in motion_evr.read() {
            orbit.yaw += ev.delta.x * ROTATE_SPEED * dt;
            orbit.pitch += ev.delta.y * ROTATE_SPEED * dt;
        }
    }

    orbit.pitch = orbit.pitch.clamp(
        -std::f32::consts::FRAC_PI_2 + 0.01,
        std::f32::consts::FRAC_PI_2 - 0.01,
    );

    // 5) Position camera
    let xz_radius = orbit.radius * orbit.pitch.cos();
    let offset = Vec3::new(
        xz_radius * orbit.yaw.cos(),
        orbit.radius * orbit.pitch.sin(),
        xz_radius * orbit.yaw.sin(),
    );

    tf.translation = orbit.focus + offset;

    // 6) Prevent underground camera
    if let Ok(surface) = field.surface_height(tf.translation) {
        if tf.translation.y < surface + CAMERA_CLEARANCE {
            tf.translation.y = surface + CAMERA_CLEARANCE;
        }
    }

    tf.look_at(orbit.focus, Vec3::Y);
}
