use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::puzzle::gesture::ScreenProjector;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_MAX_PITCH_RAD, CAMERA_3D_MAX_RADIUS, CAMERA_3D_MIN_RADIUS,
    CAMERA_3D_ORBIT_SENSITIVITY, CAMERA_3D_ZOOM_STEP,
};
use crate::utils::constants::input_constants::SCROLL_PIXELS_PER_LINE;
use crate::utils::objects::OrbitCamera;
use crate::utils::systems_logic::GameSet;

pub struct Camera3dOrbitPlugin;

impl Plugin for Camera3dOrbitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (camera_3d_zoom_inputs, apply_orbit_camera)
                .chain()
                .after(GameSet::Input),
        );
    }
}

impl OrbitCamera {
    /// Orbits by a pointer drag in pixels. Dragging right spins the cube right.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * CAMERA_3D_ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * CAMERA_3D_ORBIT_SENSITIVITY)
            .clamp(-CAMERA_3D_MAX_PITCH_RAD, CAMERA_3D_MAX_PITCH_RAD);
    }

    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius - lines * CAMERA_3D_ZOOM_STEP)
            .clamp(CAMERA_3D_MIN_RADIUS, CAMERA_3D_MAX_RADIUS);
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.pitch.cos() * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            self.radius * self.pitch.cos() * self.yaw.cos(),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Projects through a Bevy camera into viewport pixels.
pub struct CameraProjector<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl ScreenProjector for CameraProjector<'_> {
    fn project(&self, world: Vec3) -> Option<Vec2> {
        self.camera.world_to_viewport(self.transform, world).ok()
    }
}

/// Zooms in/out with the mouse wheel
pub fn camera_3d_zoom_inputs(
    mut scroll: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let Ok(mut orbit) = camera_query.single_mut() else {
        return;
    };
    for event in scroll.read() {
        let lines = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / SCROLL_PIXELS_PER_LINE,
        };
        orbit.zoom(lines);
    }
}

/// Moves the camera to its orbit position and looks at the cube.
pub fn apply_orbit_camera(
    mut camera_query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (orbit, mut transform) in &mut camera_query {
        *transform = orbit.transform();
    }
}
