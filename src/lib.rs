//! Declaration of the modules for rubiks_3d_game.

/// Cube engine: lattice, moves, animation queue, history and solved checks.
/// Never touches meshes or windows; the front end reads it through `Session`.
pub mod puzzle {
    pub mod animator;
    pub mod axis;
    pub mod error;
    pub mod gesture;
    pub mod grid;
    pub mod history;
    pub mod moves;
    pub mod session;
    pub mod solved;
}

/// Bevy front end: scene, input, HUD and settings
pub mod utils {
    pub mod camera;
    pub mod constants;
    pub mod cube;
    pub mod debug_functions;
    pub mod game_functions;
    pub mod inputs;
    pub mod objects;
    pub mod settings;
    pub mod setup;
    pub mod systems_logic;
    pub mod touch_inputs;
}
