//! Debug functions for the game.
use bevy::{prelude::*, window::*};

use crate::puzzle::session::Session;
use crate::utils::constants::cube_constants::UNIT;

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    /// Plugin by adding the debug toggles to the app.
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_vsync, visualize_lattice));
    }
}

/// Toggles VSync when F2 is pressed.
fn toggle_vsync(input: Res<ButtonInput<KeyCode>>, mut window: Query<&mut Window>) {
    if !input.just_pressed(KeyCode::F2) {
        return;
    }
    let Ok(mut window) = window.single_mut() else {
        return;
    };

    window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
        PresentMode::AutoNoVsync
    } else {
        PresentMode::AutoVsync
    };

    info!("PRESENT_MODE: {:?}", window.present_mode);
}

/// Draws the lattice points and the animating slice when F3 is pressed.
fn visualize_lattice(
    mut gizmos: Gizmos,
    session: Res<Session>,
    input: Res<ButtonInput<KeyCode>>,
    mut show_lattice: Local<bool>,
) {
    if input.just_pressed(KeyCode::F3) {
        *show_lattice = !*show_lattice;
        info!("Lattice visualization: {}", *show_lattice);
    }
    if !*show_lattice {
        return;
    }

    let grid = session.grid();
    for cubie in grid.cubies() {
        let color = if cubie.is_core() {
            Color::srgb(1.0, 0.0, 1.0)
        } else {
            Color::WHITE
        };
        gizmos.sphere(cubie.grid_position().as_vec3() * UNIT, 0.08, color);
    }

    // Slice currently turning, outlined on its plane
    if let Some(mv) = session.current_move() {
        let axis = mv.twist.axis.unit();
        let center = axis * mv.twist.layer() as f32 * UNIT;
        let rotation = Quat::from_rotation_arc(Vec3::Z, axis);
        gizmos.rect(
            Isometry3d::new(center, rotation),
            Vec2::splat(3.0 * UNIT),
            Color::srgb(0.2, 1.0, 0.4),
        );
    }
}
