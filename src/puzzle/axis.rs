//! Axis and face vocabulary shared by the whole engine.

use std::fmt;

use bevy::math::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// One of the three lattice axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector pointing along the positive end of the axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn component(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    pub fn int_component(self, v: IVec3) -> i32 {
        v[self.index()]
    }

    /// The two axes orthogonal to `self`, in cyclic order.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Axis with the largest absolute component of `v`.
    ///
    /// Returns `None` for zero or non-finite vectors.
    pub fn dominant(v: Vec3) -> Option<Axis> {
        if !v.is_finite() || v.length_squared() <= f32::EPSILON {
            return None;
        }
        let abs = v.abs();
        Some(if abs.x >= abs.y && abs.x >= abs.z {
            Axis::X
        } else if abs.y >= abs.z {
            Axis::Y
        } else {
            Axis::Z
        })
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(label)
    }
}

/// A face slot of a cubie, or equivalently one of the six outward directions.
///
/// Slots are fixed to the cubie: after rotations, a slot's world direction is
/// found with [`crate::puzzle::grid::Cubie::facing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub fn index(self) -> usize {
        match self {
            Face::PosX => 0,
            Face::NegX => 1,
            Face::PosY => 2,
            Face::NegY => 3,
            Face::PosZ => 4,
            Face::NegZ => 5,
        }
    }

    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Face::PosX,
            (Axis::X, false) => Face::NegX,
            (Axis::Y, true) => Face::PosY,
            (Axis::Y, false) => Face::NegY,
            (Axis::Z, true) => Face::PosZ,
            (Axis::Z, false) => Face::NegZ,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::PosX | Face::NegX => Axis::X,
            Face::PosY | Face::NegY => Axis::Y,
            Face::PosZ | Face::NegZ => Axis::Z,
        }
    }

    /// `1` for the positive faces, `-1` for the negative ones.
    pub fn sign(self) -> i32 {
        match self {
            Face::PosX | Face::PosY | Face::PosZ => 1,
            Face::NegX | Face::NegY | Face::NegZ => -1,
        }
    }

    pub fn normal(self) -> Vec3 {
        self.axis().unit() * self.sign() as f32
    }

    /// Rounds a direction to the nearest cardinal face.
    pub fn from_direction(v: Vec3) -> Option<Face> {
        let axis = Axis::dominant(v)?;
        Some(Face::new(axis, axis.component(v) > 0.0))
    }
}
