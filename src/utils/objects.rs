// This file defines the various objects, resources, and components used in the game.
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::puzzle::gesture::{DragStart, DragTracker};
use crate::puzzle::grid::CubieId;
use crate::puzzle::moves::Twist;
use crate::puzzle::session::SessionEvent;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
};

/// A resource for random number generation.
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    // Creates a new `RandomGen` from a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    // Creates a new `RandomGen` with the default seed.
    fn default() -> Self {
        Self::from_seed(crate::utils::constants::game_constants::SEED)
    }
}

/// The body mesh of one cubie; its transform mirrors the engine's cubie.
#[derive(Component, Clone, Copy, Debug)]
pub struct CubieMesh {
    pub id: CubieId,
}

/// A sticker plate, child of a [`CubieMesh`]. `face` indexes the theme palette.
#[derive(Component, Clone, Copy, Debug)]
pub struct StickerMesh {
    pub face: usize,
}

/// The translucent plane over a hinted slice.
#[derive(Component)]
pub struct HintOverlay {
    pub twist: Twist,
}

/// A component that marks an entity as a game entity, which can be cleared during setup.
#[derive(Component)]
pub struct GameEntity;

/// A component that marks an entity as a UI entity.
#[derive(Component)]
pub struct UIEntity;

// HUD text markers
#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct MoveCounterText;

#[derive(Component)]
pub struct TimerText;

#[derive(Component)]
pub struct SettingsText;

#[derive(Component)]
pub struct WinBanner;

/// What an on-screen button does when pressed.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Shuffle,
    Solve,
    Reset,
    Hint,
    Difficulty,
    Speed,
    Sound,
    Theme,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 8] = [
        ButtonAction::Shuffle,
        ButtonAction::Solve,
        ButtonAction::Reset,
        ButtonAction::Hint,
        ButtonAction::Difficulty,
        ButtonAction::Speed,
        ButtonAction::Sound,
        ButtonAction::Theme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ButtonAction::Shuffle => "Shuffle (N)",
            ButtonAction::Solve => "Solve (Enter)",
            ButtonAction::Reset => "Reset (Bksp)",
            ButtonAction::Hint => "Hint (H)",
            ButtonAction::Difficulty => "Difficulty (1-3)",
            ButtonAction::Speed => "Speed (P)",
            ButtonAction::Sound => "Sound (M)",
            ButtonAction::Theme => "Theme (T)",
        }
    }
}

/// Orbit state of the main camera, around the origin.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let eye = Vec3::new(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z);
        let radius = eye.length();
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: (eye.y / radius).asin(),
            radius,
        }
    }
}

/// Pointer (mouse or first touch) state shared by drag and orbit handling.
#[derive(Resource, Default, Debug)]
pub struct PointerState {
    pub drag: DragTracker,
    /// Pointer went down off the cube and is orbiting the camera.
    pub orbiting: bool,
    pub last_position: Option<Vec2>,
    pub touch_id: Option<u64>,
    /// Finger distance of an ongoing two-touch pinch.
    pub pinch_distance: Option<f32>,
    /// Face under the cursor, used by arrow-key gestures.
    pub hovered: Option<DragStart>,
}

/// Rebuild the cubie meshes from the session grid.
#[derive(Message, Clone, Copy, Debug)]
pub struct RebuildCube;

/// Forwarded engine events, for presentation systems.
#[derive(Message, Clone, Copy, Debug)]
pub struct SessionNotice(pub SessionEvent);

/// Text of the most recent action that overrides the status line, e.g. a hint.
#[derive(Resource, Default, Debug)]
pub struct StatusOverride {
    pub text: Option<String>,
}
