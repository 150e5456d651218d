//! Move descriptors: what to turn, how long it takes, and where it came from.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::puzzle::axis::Axis;
use crate::puzzle::error::ActionRejected;
use crate::utils::constants::game_constants::{MANUAL_MOVE_MS, SHUFFLE_MOVE_MS, SOLVE_MOVE_MS};

/// Turn direction, as seen from the positive end of the rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn from_sign(sign: i32) -> Self {
        if sign >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A quarter turn of one slice: everything a history entry needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Twist {
    pub axis: Axis,
    layer: i8,
    pub direction: Direction,
}

impl Twist {
    pub fn new(axis: Axis, layer: i32, direction: Direction) -> Result<Self, ActionRejected> {
        if !(-1..=1).contains(&layer) {
            return Err(ActionRejected::InvalidLayer(layer));
        }
        Ok(Self {
            axis,
            layer: layer as i8,
            direction,
        })
    }

    pub fn layer(&self) -> i32 {
        i32::from(self.layer)
    }

    /// Same slice, opposite direction.
    pub fn inverse(self) -> Self {
        Self {
            direction: self.direction.inverse(),
            ..self
        }
    }

    /// Signed rotation about the positive axis, in radians.
    pub fn target_angle(&self) -> f32 {
        FRAC_PI_2 * self.direction.sign() as f32 * -1.0
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
        };
        write!(f, "Rotate {} layer at index {} {}", self.axis, self.layer, dir)
    }
}

/// Who asked for a move. Decides scoring and whether it is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Manual,
    Shuffle,
    Solve,
}

impl MoveSource {
    pub fn counts_toward_score(self) -> bool {
        self == MoveSource::Manual
    }

    pub fn is_recorded(self) -> bool {
        self != MoveSource::Solve
    }
}

/// A queued quarter turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    pub twist: Twist,
    pub duration: Duration,
    pub source: MoveSource,
}

/// Animation speed preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn next(self) -> Self {
        match self {
            SpeedPreset::Slow => SpeedPreset::Normal,
            SpeedPreset::Normal => SpeedPreset::Fast,
            SpeedPreset::Fast => SpeedPreset::Slow,
        }
    }

    pub fn duration(self, source: MoveSource) -> Duration {
        let base = match source {
            MoveSource::Manual => MANUAL_MOVE_MS,
            MoveSource::Shuffle => SHUFFLE_MOVE_MS,
            MoveSource::Solve => SOLVE_MOVE_MS,
        };
        // Percent of the normal duration.
        let scale = match self {
            SpeedPreset::Slow => 160,
            SpeedPreset::Normal => 100,
            SpeedPreset::Fast => 60,
        };
        Duration::from_millis(base * scale / 100)
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Normal => "normal",
            SpeedPreset::Fast => "fast",
        }
    }
}
