//! Cubie meshes, transform mirroring, theme colors and the hint plane.

use bevy::prelude::*;

use crate::puzzle::axis::{Axis, Face};
use crate::puzzle::grid::CubeGrid;
use crate::puzzle::session::Session;
use crate::utils::constants::cube_constants::{
    BODY_COLOR, CUBIE_SIZE, HINT_COLOR, STICKER_SIZE, STICKER_THICKNESS, UNIT,
};
use crate::utils::objects::{CubieMesh, GameEntity, HintOverlay, RebuildCube, StickerMesh};
use crate::utils::settings::{Settings, Theme};

/// Shared mesh and material handles for every cubie.
#[derive(Resource)]
pub struct CubeAssets {
    pub body_mesh: Handle<Mesh>,
    pub body_material: Handle<StandardMaterial>,
    /// One plate mesh per face axis, thin along that axis.
    pub sticker_meshes: [Handle<Mesh>; 3],
    /// Indexed by [`Face::index`].
    pub sticker_materials: [Handle<StandardMaterial>; 6],
    pub hint_mesh: Handle<Mesh>,
    pub hint_material: Handle<StandardMaterial>,
}

fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

fn sticker_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.6,
        ..default()
    }
}

impl CubeAssets {
    pub fn new(
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        theme: Theme,
    ) -> Self {
        let palette = theme.palette();
        let mut plate = |axis: Axis| {
            let mut size = Vec3::splat(STICKER_SIZE);
            size[axis.index()] = STICKER_THICKNESS;
            meshes.add(Cuboid::from_size(size))
        };
        let sticker_meshes = [plate(Axis::X), plate(Axis::Y), plate(Axis::Z)];
        let [r, g, b, a] = HINT_COLOR;
        Self {
            body_mesh: meshes.add(Cuboid::from_length(CUBIE_SIZE)),
            body_material: materials.add(sticker_material(srgb(BODY_COLOR))),
            sticker_meshes,
            sticker_materials: palette.map(|rgb| materials.add(sticker_material(srgb(rgb)))),
            hint_mesh: meshes.add(Cuboid::new(3.0 * UNIT, 3.0 * UNIT, 0.01)),
            hint_material: materials.add(StandardMaterial {
                base_color: Color::srgba(r, g, b, a),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                cull_mode: None,
                double_sided: true,
                ..default()
            }),
        }
    }
}

/// Spawns one body per visible cubie, with its stickers as children.
pub fn spawn_cubies(commands: &mut Commands, assets: &CubeAssets, grid: &CubeGrid) {
    for cubie in grid.cubies() {
        if cubie.is_core() {
            continue;
        }
        commands
            .spawn((
                Mesh3d(assets.body_mesh.clone()),
                MeshMaterial3d(assets.body_material.clone()),
                Transform::from_translation(cubie.position()).with_rotation(cubie.rotation()),
                CubieMesh { id: cubie.id() },
                GameEntity,
            ))
            .with_children(|parent| {
                for slot in Face::ALL {
                    if cubie.sticker(slot).is_none() {
                        continue;
                    }
                    let offset = (CUBIE_SIZE + STICKER_THICKNESS) / 2.0;
                    parent.spawn((
                        Mesh3d(assets.sticker_meshes[slot.axis().index()].clone()),
                        MeshMaterial3d(assets.sticker_materials[slot.index()].clone()),
                        Transform::from_translation(slot.normal() * offset),
                        StickerMesh { face: slot.index() },
                    ));
                }
            });
    }
}

/// Despawns the old batch of cubies and builds a fresh one.
pub fn rebuild_cube(
    mut commands: Commands,
    mut rebuild: MessageReader<RebuildCube>,
    session: Res<Session>,
    assets: Res<CubeAssets>,
    cubies: Query<Entity, With<CubieMesh>>,
) {
    if rebuild.read().count() == 0 {
        return;
    }
    for entity in &cubies {
        commands.entity(entity).despawn();
    }
    spawn_cubies(&mut commands, &assets, session.grid());
    debug!("Cube rebuilt");
}

/// Mirrors the engine's cubie transforms onto their meshes.
pub fn sync_cubie_transforms(
    session: Res<Session>,
    mut cubies: Query<(&CubieMesh, &mut Transform)>,
) {
    if !session.is_changed() {
        return;
    }
    for (mesh, mut transform) in &mut cubies {
        let Some(cubie) = session.grid().cubie(mesh.id) else {
            continue;
        };
        if transform.translation != cubie.position() || transform.rotation != cubie.rotation() {
            transform.translation = cubie.position();
            transform.rotation = cubie.rotation();
        }
    }
}

/// Recolors the shared sticker materials when the theme changes.
pub fn apply_theme(
    settings: Res<Settings>,
    assets: Res<CubeAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !settings.is_changed() {
        return;
    }
    for (handle, rgb) in assets.sticker_materials.iter().zip(settings.theme.palette()) {
        if let Some(material) = materials.get_mut(handle) {
            material.base_color = srgb(rgb);
        }
    }
}

/// Transform that lays the hint plane over slice `layer` of `axis`.
pub fn hint_plane_transform(axis: Axis, layer: i32) -> Transform {
    let offset = axis.unit() * layer as f32 * UNIT;
    let rotation = match axis {
        Axis::X => Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Axis::Y => Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        Axis::Z => Quat::IDENTITY,
    };
    Transform::from_translation(offset).with_rotation(rotation)
}

/// Shows the hint plane while the session has an active hint.
pub fn update_hint_overlay(
    mut commands: Commands,
    session: Res<Session>,
    assets: Res<CubeAssets>,
    overlays: Query<(Entity, &HintOverlay)>,
) {
    let wanted = session.active_hint();
    let mut shown = false;
    for (entity, overlay) in &overlays {
        if Some(overlay.twist) == wanted {
            shown = true;
        } else {
            commands.entity(entity).despawn();
        }
    }
    let Some(twist) = wanted else {
        return;
    };
    if shown {
        return;
    }
    commands.spawn((
        Mesh3d(assets.hint_mesh.clone()),
        MeshMaterial3d(assets.hint_material.clone()),
        hint_plane_transform(twist.axis, twist.layer()),
        HintOverlay { twist },
        GameEntity,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_plane_faces_along_its_axis() {
        for axis in Axis::ALL {
            let transform = hint_plane_transform(axis, 1);
            let normal = transform.rotation * Vec3::Z;
            assert!(normal.abs().distance(axis.unit()) < 1e-5);
            assert!((axis.component(transform.translation) - UNIT).abs() < 1e-6);
        }
    }
}
