//! Solved-state detection from world-space sticker directions.

use crate::puzzle::axis::Face;
use crate::puzzle::grid::{CubeGrid, StickerColor};

/// The common color of one outer face, or `None` if it is mixed.
///
/// Looks at the cubies currently on the face plane and, for each, the sticker
/// slot that now points out of that plane.
pub fn face_color(grid: &CubeGrid, face: Face) -> Option<StickerColor> {
    let on_plane = grid.cubies_in_slice(face.axis(), face.sign());
    if on_plane.len() != 9 {
        return None;
    }

    let mut color = None;
    for id in on_plane {
        let sticker = grid.cubie(id)?.sticker_facing(face)?;
        match color {
            None => color = Some(sticker),
            Some(seen) if seen != sticker => return None,
            Some(_) => {}
        }
    }
    color
}

/// True iff every face shows nine stickers of one color.
pub fn is_cube_solved(grid: &CubeGrid) -> bool {
    Face::ALL
        .into_iter()
        .all(|face| face_color(grid, face).is_some())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolvedTransition {
    BecameSolved,
    BecameUnsolved,
}

/// Edge detector over successive solved checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolvedTracker {
    solved: bool,
}

impl Default for SolvedTracker {
    fn default() -> Self {
        Self { solved: true }
    }
}

impl SolvedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Records the latest check; returns a transition only when it changed.
    pub fn update(&mut self, solved: bool) -> Option<SolvedTransition> {
        if solved == self.solved {
            return None;
        }
        self.solved = solved;
        Some(if solved {
            SolvedTransition::BecameSolved
        } else {
            SolvedTransition::BecameUnsolved
        })
    }

    pub fn reset(&mut self) {
        self.solved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::axis::Axis;
    use crate::puzzle::moves::{Direction, Twist};

    #[test]
    fn a_fresh_cube_is_solved() {
        let grid = CubeGrid::new();
        assert!(is_cube_solved(&grid));
        for face in Face::ALL {
            assert_eq!(
                face_color(&grid, face),
                Some(StickerColor::COLORS[face.index()])
            );
        }
    }

    #[test]
    fn any_single_quarter_turn_unsolves() {
        for axis in Axis::ALL {
            for layer in -1..=1 {
                for direction in [Direction::Clockwise, Direction::CounterClockwise] {
                    let mut grid = CubeGrid::new();
                    grid.turn(Twist::new(axis, layer, direction).unwrap());
                    assert!(!is_cube_solved(&grid), "{axis} {layer} {direction:?}");
                }
            }
        }
    }

    #[test]
    fn a_turned_face_keeps_its_own_color() {
        let mut grid = CubeGrid::new();
        grid.turn(Twist::new(Axis::Y, 1, Direction::Clockwise).unwrap());
        assert_eq!(face_color(&grid, Face::PosY), Some(StickerColor::White));
        assert_eq!(face_color(&grid, Face::NegY), Some(StickerColor::Yellow));
        assert_eq!(face_color(&grid, Face::PosX), None);
    }

    #[test]
    fn four_quarter_turns_solve_again() {
        let mut grid = CubeGrid::new();
        let twist = Twist::new(Axis::Z, 0, Direction::CounterClockwise).unwrap();
        for _ in 0..4 {
            grid.turn(twist);
        }
        assert!(is_cube_solved(&grid));
    }

    #[test]
    fn tracker_reports_each_edge_once() {
        let mut tracker = SolvedTracker::new();
        assert_eq!(tracker.update(true), None);
        assert_eq!(tracker.update(false), Some(SolvedTransition::BecameUnsolved));
        assert_eq!(tracker.update(false), None);
        assert_eq!(tracker.update(true), Some(SolvedTransition::BecameSolved));
        assert_eq!(tracker.update(true), None);
    }
}
