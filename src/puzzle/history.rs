//! Recorded moves, solve-by-undo, and random scrambles.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::puzzle::axis::Axis;
use crate::puzzle::moves::{Direction, Twist};
use crate::utils::constants::game_constants::{
    EASY_SHUFFLE_MOVES, HARD_SHUFFLE_MOVES, HISTORY_CAP, MEDIUM_SHUFFLE_MOVES,
};

/// Executed twists, oldest first, bounded by [`HISTORY_CAP`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveHistory {
    entries: VecDeque<Twist>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, twist: Twist) {
        self.entries.push_back(twist);
        while self.entries.len() > HISTORY_CAP {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<Twist> {
        self.entries.back().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Twist> + '_ {
        self.entries.iter().copied()
    }

    /// The twists that undo this history, in the order to apply them.
    pub fn inverse_sequence(&self) -> Vec<Twist> {
        inverse_sequence(self.iter())
    }
}

/// Reverses a sequence of twists and inverts each one.
pub fn inverse_sequence<I>(twists: I) -> Vec<Twist>
where
    I: IntoIterator<Item = Twist>,
    I::IntoIter: DoubleEndedIterator,
{
    twists.into_iter().rev().map(Twist::inverse).collect()
}

/// Scramble length preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn shuffle_moves(self) -> RangeInclusive<u32> {
        let (min, max) = match self {
            Difficulty::Easy => EASY_SHUFFLE_MOVES,
            Difficulty::Medium => MEDIUM_SHUFFLE_MOVES,
            Difficulty::Hard => HARD_SHUFFLE_MOVES,
        };
        min..=max
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Uniformly random twist over every axis, layer and direction.
pub fn random_twist<R: Rng + ?Sized>(rng: &mut R) -> Twist {
    let axis = Axis::ALL[rng.random_range(0..Axis::ALL.len())];
    let layer = rng.random_range(-1..=1);
    let direction = if rng.random_bool(0.5) {
        Direction::Clockwise
    } else {
        Direction::CounterClockwise
    };
    Twist::new(axis, layer, direction)
        .unwrap_or_else(|_| unreachable!("layer sampled from -1..=1"))
}

/// A scramble whose length is drawn from the difficulty's range.
pub fn scramble<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Vec<Twist> {
    let count = rng.random_range(difficulty.shuffle_moves());
    (0..count).map(|_| random_twist(rng)).collect()
}

/// Suggested next move: undo the most recent one.
pub fn hint_for(history: &MoveHistory) -> Option<Twist> {
    history.last().map(Twist::inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::puzzle::grid::CubeGrid;

    #[test]
    fn history_evicts_the_oldest_past_the_cap() {
        let mut history = MoveHistory::new();
        let first = Twist::new(Axis::X, -1, Direction::Clockwise).unwrap();
        let rest = Twist::new(Axis::Y, 0, Direction::Clockwise).unwrap();
        history.record(first);
        for _ in 0..HISTORY_CAP {
            history.record(rest);
        }
        assert_eq!(history.len(), HISTORY_CAP);
        assert!(history.iter().all(|t| t == rest));
    }

    #[test]
    fn inverse_sequence_reverses_and_flips() {
        let a = Twist::new(Axis::X, 1, Direction::Clockwise).unwrap();
        let b = Twist::new(Axis::Z, -1, Direction::CounterClockwise).unwrap();
        assert_eq!(inverse_sequence([a, b]), vec![b.inverse(), a.inverse()]);
    }

    #[test]
    fn undoing_a_scramble_restores_the_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = CubeGrid::new();
        let mut history = MoveHistory::new();
        for twist in scramble(&mut rng, Difficulty::Hard) {
            grid.turn(twist);
            history.record(twist);
        }
        for twist in history.inverse_sequence() {
            grid.turn(twist);
        }
        assert_eq!(grid, CubeGrid::new());
    }

    #[test]
    fn scramble_length_follows_difficulty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for difficulty in Difficulty::ALL {
            for _ in 0..20 {
                let len = scramble(&mut rng, difficulty).len() as u32;
                assert!(difficulty.shuffle_moves().contains(&len));
            }
        }
    }

    #[test]
    fn random_twists_cover_every_axis_and_layer() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let twists: Vec<_> = (0..500).map(|_| random_twist(&mut rng)).collect();
        for axis in Axis::ALL {
            for layer in -1..=1 {
                assert!(twists.iter().any(|t| t.axis == axis && t.layer() == layer));
            }
        }
    }

    #[test]
    fn hint_undoes_the_last_move() {
        let mut history = MoveHistory::new();
        assert_eq!(hint_for(&history), None);
        let twist = Twist::new(Axis::Y, 1, Direction::Clockwise).unwrap();
        history.record(twist);
        assert_eq!(hint_for(&history), Some(twist.inverse()));
    }
}
