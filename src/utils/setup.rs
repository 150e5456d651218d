use bevy::prelude::*;

use crate::puzzle::session::Session;
use crate::utils::cube::{CubeAssets, spawn_cubies};
use crate::utils::objects::OrbitCamera;
use crate::utils::settings::Settings;

/// Camera, lights and the initial cube.
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    session: Res<Session>,
) {
    // Camera
    let orbit = OrbitCamera::default();
    commands.spawn((Camera3d::default(), orbit.transform(), orbit));

    // Key light from above, fill light from below and behind
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            ..default()
        },
        Transform::from_xyz(-10.0, -10.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
        affects_lightmapped_meshes: true,
    });

    let assets = CubeAssets::new(&mut meshes, &mut materials, settings.theme);
    spawn_cubies(&mut commands, &assets, session.grid());
    commands.insert_resource(assets);

    info!("Rubik's cube ready");
    info!("Drag a face to turn it, drag the background to orbit");
    info!("R L U D F B: turn faces (Shift inverts) | N: shuffle | Enter: solve | H: hint");
}
