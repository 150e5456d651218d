//! The 27-cubie lattice, sticker assignment, and snapping back to the grid.

use std::sync::LazyLock;

use bevy::math::{IVec3, Mat3, Quat, Vec3};

use crate::puzzle::axis::{Axis, Face};
use crate::puzzle::moves::Twist;
use crate::utils::constants::cube_constants::{SLICE_EPSILON, UNIT};

/// Sticker colors, in the face order they are assigned at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickerColor {
    Red,
    Orange,
    White,
    Yellow,
    Green,
    Blue,
}

impl StickerColor {
    /// `COLORS[face.index()]` is the color of that face on a solved cube.
    pub const COLORS: [StickerColor; 6] = [
        StickerColor::Red,
        StickerColor::Orange,
        StickerColor::White,
        StickerColor::Yellow,
        StickerColor::Green,
        StickerColor::Blue,
    ];

    pub fn index(self) -> usize {
        match self {
            StickerColor::Red => 0,
            StickerColor::Orange => 1,
            StickerColor::White => 2,
            StickerColor::Yellow => 3,
            StickerColor::Green => 4,
            StickerColor::Blue => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub usize);

/// One of the 27 small cubes.
#[derive(Clone, Debug, PartialEq)]
pub struct Cubie {
    id: CubieId,
    home: IVec3,
    position: Vec3,
    rotation: Quat,
    /// Indexed by [`Face::index`] of the slot; `None` is an interior face.
    stickers: [Option<StickerColor>; 6],
}

impl Cubie {
    fn new(id: CubieId, home: IVec3) -> Self {
        let mut stickers = [None; 6];
        for slot in Face::ALL {
            if slot.axis().int_component(home) == slot.sign() {
                stickers[slot.index()] = Some(StickerColor::COLORS[slot.index()]);
            }
        }
        Self {
            id,
            home,
            position: home.as_vec3() * UNIT,
            rotation: Quat::IDENTITY,
            stickers,
        }
    }

    pub fn id(&self) -> CubieId {
        self.id
    }

    /// Grid coordinate this cubie was created at.
    pub fn home(&self) -> IVec3 {
        self.home
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn sticker(&self, slot: Face) -> Option<StickerColor> {
        self.stickers[slot.index()]
    }

    /// Whether this cubie shows no stickers at all (the hidden core).
    pub fn is_core(&self) -> bool {
        self.stickers.iter().all(Option::is_none)
    }

    /// Nearest lattice point, in grid units.
    pub fn grid_position(&self) -> IVec3 {
        (self.position / UNIT).round().as_ivec3()
    }

    /// Whether the cubie currently sits in slice `layer` along `axis`.
    pub fn is_in_slice(&self, axis: Axis, layer: i32) -> bool {
        (axis.component(self.position) / UNIT - layer as f32).abs() < SLICE_EPSILON
    }

    /// World direction the given face slot currently points to.
    pub fn facing(&self, slot: Face) -> Option<Face> {
        Face::from_direction(self.rotation * slot.normal())
    }

    /// Sticker currently pointing towards `direction`, if any.
    pub fn sticker_facing(&self, direction: Face) -> Option<StickerColor> {
        Face::ALL
            .into_iter()
            .find(|&slot| self.facing(slot) == Some(direction))
            .and_then(|slot| self.sticker(slot))
    }

    fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    fn snap(&mut self) {
        self.position = snap_position(self.position);
        self.rotation = snap_rotation(self.rotation);
    }
}

static CUBE_ROTATIONS: LazyLock<Vec<Quat>> = LazyLock::new(|| {
    let mut rotations = Vec::with_capacity(24);
    for x_image in Face::ALL {
        for y_image in Face::ALL {
            if x_image.axis() == y_image.axis() {
                continue;
            }
            let x = x_image.normal();
            let y = y_image.normal();
            let basis = Mat3::from_cols(x, y, x.cross(y));
            rotations.push(Quat::from_mat3(&basis).normalize());
        }
    }
    rotations
});

/// The 24 rotations mapping the cube onto itself.
pub fn cube_rotations() -> &'static [Quat] {
    &CUBE_ROTATIONS
}

/// Rounds each component to the nearest multiple of [`UNIT`].
pub fn snap_position(position: Vec3) -> Vec3 {
    (position / UNIT).round() * UNIT
}

/// Nearest element of [`cube_rotations`].
///
/// `q` and `-q` are the same rotation, so closeness is `|q·r|`.
pub fn snap_rotation(rotation: Quat) -> Quat {
    let mut best = Quat::IDENTITY;
    let mut best_dot = f32::NEG_INFINITY;
    for &candidate in cube_rotations() {
        let dot = candidate.dot(rotation).abs();
        if dot > best_dot {
            best_dot = dot;
            best = candidate;
        }
    }
    best
}

/// Slice members grouped under a temporary rotation.
///
/// Captures every member's transform when attached; rotating the pivot
/// rewrites members as `rotation * captured`, releasing it snaps them back to
/// the lattice.
#[derive(Clone, Debug)]
pub struct Pivot {
    axis: Axis,
    members: Vec<(CubieId, Vec3, Quat)>,
}

impl Pivot {
    pub fn attach(grid: &CubeGrid, axis: Axis, layer: i32) -> Self {
        let members = grid
            .cubies
            .iter()
            .filter(|cubie| cubie.is_in_slice(axis, layer))
            .map(|cubie| (cubie.id, cubie.position, cubie.rotation))
            .collect();
        Self { axis, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sets the pivot rotation to `angle` radians about its axis.
    pub fn rotate(&self, grid: &mut CubeGrid, angle: f32) {
        let rotation = Quat::from_axis_angle(self.axis.unit(), angle);
        for &(id, position, orientation) in &self.members {
            if let Some(cubie) = grid.cubies.get_mut(id.0) {
                cubie.set_transform(rotation * position, rotation * orientation);
            }
        }
    }

    /// Applies the final `angle` exactly and snaps every member.
    pub fn release(self, grid: &mut CubeGrid, angle: f32) {
        self.rotate(grid, angle);
        for (id, _, _) in self.members {
            if let Some(cubie) = grid.cubies.get_mut(id.0) {
                cubie.snap();
            }
        }
    }
}

/// The full 3×3×3 batch of cubies.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeGrid {
    cubies: Vec<Cubie>,
}

impl Default for CubeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeGrid {
    pub fn new() -> Self {
        let mut cubies = Vec::with_capacity(27);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    let id = CubieId(cubies.len());
                    cubies.push(Cubie::new(id, IVec3::new(x, y, z)));
                }
            }
        }
        Self { cubies }
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn cubie(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.0)
    }

    /// Cubies currently occupying a slice, found from live positions.
    pub fn cubies_in_slice(&self, axis: Axis, layer: i32) -> Vec<CubieId> {
        self.cubies
            .iter()
            .filter(|cubie| cubie.is_in_slice(axis, layer))
            .map(Cubie::id)
            .collect()
    }

    /// Cubie currently at a lattice point.
    pub fn cubie_at(&self, grid_position: IVec3) -> Option<&Cubie> {
        self.cubies
            .iter()
            .find(|cubie| cubie.grid_position() == grid_position)
    }

    /// Applies a full quarter turn without animation.
    pub fn turn(&mut self, twist: Twist) {
        Pivot::attach(self, twist.axis, twist.layer()).release(self, twist.target_angle());
    }

    /// Whether every cubie sits exactly on the lattice with a cube rotation.
    pub fn is_aligned(&self) -> bool {
        self.cubies.iter().all(|cubie| {
            cubie.position == snap_position(cubie.position)
                && cube_rotations().contains(&cubie.rotation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::moves::Direction;

    fn all_twists() -> Vec<Twist> {
        let mut twists = Vec::new();
        for axis in Axis::ALL {
            for layer in -1..=1 {
                for direction in [Direction::Clockwise, Direction::CounterClockwise] {
                    twists.push(Twist::new(axis, layer, direction).unwrap());
                }
            }
        }
        twists
    }

    #[test]
    fn builds_27_cubies_with_54_stickers() {
        let grid = CubeGrid::new();
        assert_eq!(grid.cubies().len(), 27);
        let stickers: usize = grid
            .cubies()
            .iter()
            .map(|c| Face::ALL.iter().filter(|&&f| c.sticker(f).is_some()).count())
            .sum();
        assert_eq!(stickers, 54);
        assert_eq!(grid.cubies().iter().filter(|c| c.is_core()).count(), 1);
    }

    #[test]
    fn corner_gets_three_stickers_on_the_right_slots() {
        let grid = CubeGrid::new();
        let corner = grid.cubie_at(IVec3::new(1, -1, 1)).unwrap();
        assert_eq!(corner.sticker(Face::PosX), Some(StickerColor::Red));
        assert_eq!(corner.sticker(Face::NegY), Some(StickerColor::Yellow));
        assert_eq!(corner.sticker(Face::PosZ), Some(StickerColor::Green));
        assert_eq!(corner.sticker(Face::NegX), None);
        assert_eq!(corner.sticker(Face::PosY), None);
        assert_eq!(corner.sticker(Face::NegZ), None);
    }

    #[test]
    fn there_are_24_distinct_cube_rotations() {
        let rotations = cube_rotations();
        assert_eq!(rotations.len(), 24);
        for (i, a) in rotations.iter().enumerate() {
            for b in &rotations[i + 1..] {
                assert!(a.dot(*b).abs() < 0.99, "{a:?} duplicates {b:?}");
            }
        }
    }

    #[test]
    fn snapping_removes_small_errors() {
        let wobbly = Quat::from_rotation_y(FRAC_PI_2_PLUS) * Quat::from_rotation_x(0.03);
        let snapped = snap_rotation(wobbly);
        assert!(cube_rotations().contains(&snapped));
        assert_eq!(
            Face::from_direction(snapped * Vec3::X),
            Some(Face::NegZ)
        );
        assert_eq!(
            snap_position(Vec3::new(1.03, -0.01, -0.98)),
            Vec3::new(UNIT, 0.0, -UNIT)
        );
    }

    const FRAC_PI_2_PLUS: f32 = std::f32::consts::FRAC_PI_2 + 0.02;

    #[test]
    fn every_slice_holds_nine_cubies_after_any_turn() {
        for twist in all_twists() {
            let mut grid = CubeGrid::new();
            grid.turn(twist);
            for axis in Axis::ALL {
                for layer in -1..=1 {
                    assert_eq!(grid.cubies_in_slice(axis, layer).len(), 9);
                }
            }
        }
    }

    #[test]
    fn turns_keep_the_lattice_exact() {
        let mut grid = CubeGrid::new();
        for twist in all_twists() {
            grid.turn(twist);
            assert!(grid.is_aligned());
        }
        for cubie in grid.cubies() {
            let p = cubie.position();
            assert_eq!(p, (p / UNIT).round() * UNIT);
        }
    }

    #[test]
    fn a_turn_followed_by_its_inverse_restores_every_cubie() {
        for twist in all_twists() {
            let mut grid = CubeGrid::new();
            let before: Vec<_> = grid
                .cubies()
                .iter()
                .map(|c| (c.grid_position(), Face::ALL.map(|f| c.facing(f))))
                .collect();
            grid.turn(twist);
            grid.turn(twist.inverse());
            let after: Vec<_> = grid
                .cubies()
                .iter()
                .map(|c| (c.grid_position(), Face::ALL.map(|f| c.facing(f))))
                .collect();
            assert_eq!(before, after, "{twist:?}");
        }
    }

    #[test]
    fn clockwise_up_turn_carries_front_stickers_to_the_left() {
        let mut grid = CubeGrid::new();
        grid.turn(Twist::new(Axis::Y, 1, Direction::Clockwise).unwrap());
        // Viewed from above, clockwise sends +Z to -X.
        let moved = grid.cubie_at(IVec3::new(-1, 1, 0)).unwrap();
        assert_eq!(moved.home(), IVec3::new(0, 1, 1));
        assert_eq!(moved.sticker_facing(Face::NegX), Some(StickerColor::Green));
    }
}
