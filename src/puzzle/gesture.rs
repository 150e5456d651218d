//! Turning a drag on a cube face into a quarter turn.
//!
//! The resolver only needs the face normal captured at pointer-down, the grid
//! position of the grabbed cubie, and a way to project world points to the
//! screen. It never looks at the live pointer ray again.

use bevy::math::{IVec3, Vec2, Vec3};

use crate::puzzle::axis::Axis;
use crate::puzzle::moves::{Direction, Twist};
use crate::utils::constants::input_constants::{DRAG_THRESHOLD_PX, MIN_DRAG_ALIGNMENT};

/// World to screen projection, in pixels with y pointing down.
pub trait ScreenProjector {
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// What was under the pointer when the drag began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStart {
    /// World-space outward normal of the grabbed face.
    pub normal: Vec3,
    pub grid_position: IVec3,
}

/// Screen direction of a world axis as seen from the origin, normalized.
fn projected_axis(projector: &impl ScreenProjector, axis: Axis) -> Option<Vec2> {
    let origin = projector.project(Vec3::ZERO)?;
    let tip = projector.project(axis.unit())?;
    (tip - origin).try_normalize()
}

/// Resolves a screen-space drag into a twist, or `None` for a no-op gesture.
///
/// The chosen twist moves the grabbed sticker along the tangent axis whose
/// projection best matches the drag, so a drag feels the same from any orbit
/// angle.
pub fn resolve_drag(
    start: DragStart,
    delta: Vec2,
    projector: &impl ScreenProjector,
    threshold: f32,
) -> Option<Twist> {
    if !delta.is_finite() || delta.length() < threshold {
        return None;
    }
    let drag = delta.try_normalize()?;
    let face_axis = Axis::dominant(start.normal)?;
    let normal = face_axis.unit() * start.normal[face_axis.index()].signum();

    let mut best: Option<(Axis, f32)> = None;
    for tangent in face_axis.others() {
        let Some(screen) = projected_axis(projector, tangent) else {
            continue;
        };
        let dot = screen.dot(drag);
        if best.is_none_or(|(_, best_dot)| dot.abs() > best_dot.abs()) {
            best = Some((tangent, dot));
        }
    }
    let (tangent, dot) = best?;
    if dot.abs() < MIN_DRAG_ALIGNMENT {
        return None;
    }
    let screen_sign = dot.signum();

    // A positive turn about n × t carries points on the face towards +t.
    let rotation = normal.cross(tangent.unit());
    let axis = Axis::dominant(rotation)?;
    let about_positive = screen_sign * axis.component(rotation).signum();
    let direction = Direction::from_sign(-(about_positive as i32));
    let layer = axis.int_component(start.grid_position);

    Twist::new(axis, layer, direction).ok()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// Still under the threshold.
    Pending,
    Resolved(Twist),
    /// Past the threshold but no clear direction; the drag is dropped.
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    start: DragStart,
    pointer: Vec2,
}

/// A candidate cube drag between pointer-down and resolution.
///
/// While active the orbit camera must ignore the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, start: DragStart, pointer: Vec2) {
        self.active = Some(ActiveDrag { start, pointer });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Feeds a new pointer position. Past the threshold the drag always ends,
    /// with or without a twist.
    pub fn update(&mut self, pointer: Vec2, projector: &impl ScreenProjector) -> DragOutcome {
        let Some(active) = self.active else {
            return DragOutcome::Cancelled;
        };
        let delta = pointer - active.pointer;
        if delta.length() <= DRAG_THRESHOLD_PX {
            return DragOutcome::Pending;
        }
        self.active = None;
        match resolve_drag(active.start, delta, projector, DRAG_THRESHOLD_PX) {
            Some(twist) => DragOutcome::Resolved(twist),
            None => DragOutcome::Cancelled,
        }
    }

    pub fn end(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;

    use crate::puzzle::axis::Face;
    use crate::puzzle::grid::CubeGrid;

    /// Orthographic camera at `eye` looking at the origin.
    struct Ortho {
        right: Vec3,
        up: Vec3,
    }

    impl Ortho {
        fn looking_from(eye: Vec3, up: Vec3) -> Self {
            let forward = -eye.normalize();
            let right = forward.cross(up).normalize();
            let up = right.cross(forward);
            Self { right, up }
        }
    }

    impl ScreenProjector for Ortho {
        fn project(&self, world: Vec3) -> Option<Vec2> {
            // Screen y grows downwards.
            Some(Vec2::new(world.dot(self.right), -world.dot(self.up)) * 100.0)
        }
    }

    struct Degenerate;

    impl ScreenProjector for Degenerate {
        fn project(&self, _world: Vec3) -> Option<Vec2> {
            Some(Vec2::ZERO)
        }
    }

    fn cameras() -> Vec<Ortho> {
        vec![
            Ortho::looking_from(Vec3::new(6.0, 5.0, 8.0), Vec3::Y),
            Ortho::looking_from(Vec3::new(-7.0, 4.0, 3.0), Vec3::Y),
            Ortho::looking_from(Vec3::new(2.0, -6.0, -5.0), Vec3::Y),
            Ortho::looking_from(Vec3::new(0.5, 9.0, 0.5), Vec3::Z),
        ]
    }

    /// Screen-space drag that follows `world_dir` from the sticker.
    fn drag_along(camera: &Ortho, world_dir: Vec3) -> Vec2 {
        let d = camera.project(world_dir).unwrap() - camera.project(Vec3::ZERO).unwrap();
        d.normalize() * 60.0
    }

    #[test]
    fn grabbed_sticker_follows_the_drag_from_any_view() {
        for camera in cameras() {
            for face in Face::ALL {
                let forward = camera.up.cross(camera.right);
                if face.normal().dot(forward) >= -0.2 {
                    // Face is turned away from the camera.
                    continue;
                }
                for tangent in face.axis().others() {
                    for sign in [1.0, -1.0] {
                        let world_dir = tangent.unit() * sign;
                        let grid_position = face.normal().as_ivec3()
                            + (tangent.unit() * -sign).as_ivec3();
                        let start = DragStart {
                            normal: face.normal(),
                            grid_position,
                        };
                        let delta = drag_along(&camera, world_dir);
                        let Some(twist) = resolve_drag(start, delta, &camera, DRAG_THRESHOLD_PX)
                        else {
                            continue;
                        };

                        let mut grid = CubeGrid::new();
                        let grabbed = grid.cubie_at(grid_position).unwrap().id();
                        grid.turn(twist);
                        let after = grid.cubie(grabbed).unwrap().grid_position();
                        let moved = (after - grid_position).as_vec3();
                        assert!(
                            moved.dot(world_dir) > 0.0,
                            "{face:?} drag {world_dir} gave {twist:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn dragging_the_front_face_sideways_turns_a_horizontal_layer() {
        let camera = Ortho::looking_from(Vec3::new(0.0, 0.0, 10.0), Vec3::Y);
        let start = DragStart {
            normal: Vec3::Z,
            grid_position: IVec3::new(0, 1, 1),
        };
        let twist = resolve_drag(start, Vec2::new(50.0, 2.0), &camera, 10.0).unwrap();
        assert_eq!(twist.axis, Axis::Y);
        assert_eq!(twist.layer(), 1);
        // Moving the front row to the right is counter-clockwise seen from above.
        assert_eq!(twist.direction, Direction::CounterClockwise);
    }

    #[test]
    fn short_or_degenerate_drags_do_nothing() {
        let camera = Ortho::looking_from(Vec3::new(6.0, 5.0, 8.0), Vec3::Y);
        let start = DragStart {
            normal: Vec3::Z,
            grid_position: IVec3::new(1, 0, 1),
        };
        assert_eq!(resolve_drag(start, Vec2::new(4.0, 3.0), &camera, 10.0), None);
        assert_eq!(resolve_drag(start, Vec2::ZERO, &camera, 0.0), None);
        assert_eq!(
            resolve_drag(start, Vec2::new(f32::NAN, 40.0), &camera, 10.0),
            None
        );
        assert_eq!(
            resolve_drag(start, Vec2::new(30.0, 30.0), &Degenerate, 10.0),
            None
        );
        let flat = DragStart {
            normal: Vec3::ZERO,
            grid_position: IVec3::ZERO,
        };
        assert_eq!(resolve_drag(flat, Vec2::new(30.0, 0.0), &camera, 10.0), None);
    }

    #[test]
    fn slightly_off_normals_still_pick_their_face() {
        let camera = Ortho::looking_from(Vec3::new(0.0, 10.0, 0.1), Vec3::NEG_Z);
        let tilted = Quat::from_rotation_x(0.05) * Vec3::Y;
        let start = DragStart {
            normal: tilted,
            grid_position: IVec3::new(-1, 1, 0),
        };
        let twist = resolve_drag(start, Vec2::new(0.0, 40.0), &camera, 10.0).unwrap();
        assert_eq!(twist.axis, Axis::X);
        assert_eq!(twist.layer(), -1);
    }

    #[test]
    fn tracker_waits_for_the_threshold_then_ends() {
        let camera = Ortho::looking_from(Vec3::new(0.0, 0.0, 10.0), Vec3::Y);
        let mut tracker = DragTracker::new();
        tracker.begin(
            DragStart {
                normal: Vec3::Z,
                grid_position: IVec3::new(1, 1, 1),
            },
            Vec2::new(100.0, 100.0),
        );
        assert_eq!(
            tracker.update(Vec2::new(104.0, 103.0), &camera),
            DragOutcome::Pending
        );
        assert!(tracker.is_active());
        assert!(matches!(
            tracker.update(Vec2::new(100.0, 60.0), &camera),
            DragOutcome::Resolved(_)
        ));
        assert!(!tracker.is_active());
        assert_eq!(
            tracker.update(Vec2::new(0.0, 0.0), &camera),
            DragOutcome::Cancelled
        );
    }
}
