//! Pointer input for mouse and touchscreens.
//! A press on the cube starts a candidate face drag, anywhere else it orbits
//! the camera. Two fingers pinch to zoom.

use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::puzzle::gesture::{DragOutcome, DragStart};
use crate::puzzle::session::Session;
use crate::utils::camera::CameraProjector;
use crate::utils::constants::input_constants::PINCH_PIXELS_PER_STEP;
use crate::utils::objects::{CubieMesh, OrbitCamera, PointerState};
use crate::utils::systems_logic::GameSet;

/// Plugin for mouse and touch handling
pub struct TouchInputPlugin;

impl Plugin for TouchInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>().add_systems(
            Update,
            (track_hovered_face, handle_pointer, process_pinch_zoom)
                .chain()
                .in_set(GameSet::Input),
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Folds the first touch and the left mouse button into one pointer.
fn collect_pointer_events(
    mouse: &ButtonInput<MouseButton>,
    cursor: Option<Vec2>,
    touches: &Touches,
    pointer: &mut PointerState,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();

    for touch in touches.iter_just_pressed() {
        if pointer.touch_id.is_none() && touches.iter().count() == 1 {
            pointer.touch_id = Some(touch.id());
            events.push(PointerEvent::Down(touch.position()));
        }
    }
    if let Some(id) = pointer.touch_id {
        if let Some(touch) = touches.get_pressed(id) {
            if touch.delta() != Vec2::ZERO {
                events.push(PointerEvent::Move(touch.position()));
            }
        } else {
            pointer.touch_id = None;
            events.push(PointerEvent::Up);
        }
        return events;
    }

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(position) = cursor {
            events.push(PointerEvent::Down(position));
        }
    } else if mouse.pressed(MouseButton::Left) {
        match cursor {
            Some(position) => events.push(PointerEvent::Move(position)),
            // Left the window mid-drag
            None => events.push(PointerEvent::Up),
        }
    }
    if mouse.just_released(MouseButton::Left) {
        events.push(PointerEvent::Up);
    }
    events
}

/// Face of the cube under a viewport position.
fn pick_face(
    position: Vec2,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    ray_cast: &mut MeshRayCast,
    bodies: &Query<&CubieMesh>,
    session: &Session,
) -> Option<DragStart> {
    let ray = camera.viewport_to_world(camera_transform, position).ok()?;
    let filter = |entity: Entity| bodies.contains(entity);
    let settings = MeshRayCastSettings::default().with_filter(&filter);
    let (entity, hit) = ray_cast.cast_ray(ray, &settings).first()?;
    let mesh = bodies.get(*entity).ok()?;
    let cubie = session.grid().cubie(mesh.id)?;
    Some(DragStart {
        normal: hit.normal,
        grid_position: cubie.grid_position(),
    })
}

/// Keeps track of the face under the mouse cursor for arrow-key turns.
pub fn track_hovered_face(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut ray_cast: MeshRayCast,
    bodies: Query<&CubieMesh>,
    session: Res<Session>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    pointer.hovered = window.cursor_position().and_then(|position| {
        pick_face(
            position,
            camera,
            camera_transform,
            &mut ray_cast,
            &bodies,
            &session,
        )
    });
}

/// Routes pointer presses to either a cube drag or a camera orbit.
pub fn handle_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Query<&Interaction, With<Button>>,
    mut camera_query: Query<(&Camera, &GlobalTransform, &mut OrbitCamera)>,
    mut ray_cast: MeshRayCast,
    bodies: Query<&CubieMesh>,
    mut session: ResMut<Session>,
    mut pointer: ResMut<PointerState>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let events = collect_pointer_events(&mouse, cursor, &touches, &mut pointer);
    if events.is_empty() {
        return;
    }
    let Ok((camera, camera_transform, mut orbit)) = camera_query.single_mut() else {
        return;
    };

    for event in events {
        match event {
            PointerEvent::Down(position) => {
                if buttons.iter().any(|i| *i != Interaction::None) {
                    continue;
                }
                pointer.last_position = Some(position);
                let start = if session.is_accepting_input() {
                    pick_face(
                        position,
                        camera,
                        camera_transform,
                        &mut ray_cast,
                        &bodies,
                        &session,
                    )
                } else {
                    None
                };
                match start {
                    Some(start) => pointer.drag.begin(start, position),
                    None => pointer.orbiting = true,
                }
            }
            PointerEvent::Move(position) => {
                if pointer.drag.is_active() {
                    let projector = CameraProjector {
                        camera,
                        transform: camera_transform,
                    };
                    match pointer.drag.update(position, &projector) {
                        DragOutcome::Pending => {}
                        DragOutcome::Resolved(twist) => {
                            if let Err(err) = session.user_move(twist) {
                                debug!("Drag ignored: {err}");
                            }
                        }
                        DragOutcome::Cancelled => debug!("Drag had no clear direction"),
                    }
                } else if pointer.orbiting {
                    if let Some(last) = pointer.last_position {
                        orbit.orbit(position - last);
                    }
                }
                pointer.last_position = Some(position);
            }
            PointerEvent::Up => {
                pointer.drag.end();
                pointer.orbiting = false;
                pointer.last_position = None;
            }
        }
    }
}

/// Two-finger pinch zoom. Cancels any single-finger gesture in progress.
pub fn process_pinch_zoom(
    touches: Res<Touches>,
    mut pointer: ResMut<PointerState>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let mut active = touches.iter();
    let (Some(first), Some(second), None) = (active.next(), active.next(), active.next()) else {
        pointer.pinch_distance = None;
        return;
    };
    pointer.drag.end();
    pointer.orbiting = false;

    let distance = first.position().distance(second.position());
    if let Some(previous) = pointer.pinch_distance {
        if let Ok(mut orbit) = camera_query.single_mut() {
            // Fingers apart zooms in
            orbit.zoom((distance - previous) / PINCH_PIXELS_PER_STEP);
        }
    }
    pointer.pinch_distance = Some(distance);
}
