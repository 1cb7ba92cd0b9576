// src/setup.rs
use bevy::prelude::*;
use crate::input::CameraOrbit;

#[derive(Component)]
pub struct MainCamera;

pub fn setup(mut commands: Commands) {
    // 1) Light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            range: 120.0,
            ..default()
        },
        Transform::from_xyz(6.0, 14.0, 6.0),
    ));

    // 2) Camera, matching the orbit state below so the first controller
    //    frame does not jump
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(10.0, 9.6, 14.4).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        CameraOrbit {
            focus: Vec3::ZERO,
            radius: 20.0,
            yaw: 0.96,
            pitch: 0.5,
        },
    ));
}
