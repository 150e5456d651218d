// Constants used in the game, structured into modules.

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = 6.0;
    pub const CAMERA_3D_INITIAL_Y: f32 = 5.0;
    pub const CAMERA_3D_INITIAL_Z: f32 = 8.0;

    // Radians of orbit per pixel of pointer drag.
    pub const CAMERA_3D_ORBIT_SENSITIVITY: f32 = 0.008;
    // Radius change per scroll line.
    pub const CAMERA_3D_ZOOM_STEP: f32 = 0.8;

    // Radius range for the camera's orbit.
    pub const CAMERA_3D_MIN_RADIUS: f32 = 4.0;
    pub const CAMERA_3D_MAX_RADIUS: f32 = 20.0;

    // Keeps the orbit away from the poles so `looking_at` never degenerates.
    pub const CAMERA_3D_MAX_PITCH_RAD: f32 = 85.0 * (std::f32::consts::PI / 180.0);
}

/// Cube geometry
pub mod cube_constants {
    pub const CUBIE_SIZE: f32 = 1.0;
    pub const CUBIE_SPACING: f32 = 0.02;

    // Distance between neighbouring lattice points.
    pub const UNIT: f32 = CUBIE_SIZE + CUBIE_SPACING;

    // Tolerance, in lattice units, when matching a cubie to a slice or face plane.
    pub const SLICE_EPSILON: f32 = 0.1;

    // Sticker plates sit slightly proud of the cubie body.
    pub const STICKER_SIZE: f32 = 0.86;
    pub const STICKER_THICKNESS: f32 = 0.02;

    // Sticker colors in face order +X, -X, +Y, -Y, +Z, -Z (sRGB).
    pub const CLASSIC_COLORS: [[f32; 3]; 6] = [
        [0.725, 0.0, 0.0],    // #b90000 red
        [1.0, 0.349, 0.0],    // #ff5900 orange
        [1.0, 1.0, 1.0],      // #ffffff white
        [1.0, 0.835, 0.0],    // #ffd500 yellow
        [0.0, 0.608, 0.282],  // #009b48 green
        [0.0, 0.271, 0.678],  // #0045ad blue
    ];
    pub const HIGH_CONTRAST_COLORS: [[f32; 3]; 6] = [
        [0.9, 0.1, 0.1],
        [0.95, 0.5, 0.0],
        [0.97, 0.97, 0.97],
        [1.0, 0.95, 0.1],
        [0.1, 0.8, 0.2],
        [0.1, 0.35, 1.0],
    ];
    // #222222, the interior plastic.
    pub const BODY_COLOR: [f32; 3] = [0.133, 0.133, 0.133];

    // Translucent plane shown over a hinted slice.
    pub const HINT_COLOR: [f32; 4] = [0.486, 0.227, 0.929, 0.18];
}

/// Move timing and scrambling
pub mod game_constants {
    // Seed for the random number generator.
    pub const SEED: u64 = 69;

    // Oldest moves are dropped past this many recorded moves.
    pub const HISTORY_CAP: usize = 500;

    // Move durations in milliseconds for the normal speed preset.
    pub const MANUAL_MOVE_MS: u64 = 250;
    pub const SHUFFLE_MOVE_MS: u64 = 100;
    pub const SOLVE_MOVE_MS: u64 = 150;

    // Number of scramble moves per difficulty (inclusive ranges).
    pub const EASY_SHUFFLE_MOVES: (u32, u32) = (10, 15);
    pub const MEDIUM_SHUFFLE_MOVES: (u32, u32) = (20, 25);
    pub const HARD_SHUFFLE_MOVES: (u32, u32) = (40, 45);

    // How long the hint overlay stays visible, in seconds.
    pub const HINT_DURATION_SECS: f32 = 1.8;

    // Settings file, relative to the working directory.
    pub const SETTINGS_FILE: &str = "rubiks_settings.toml";
}

/// Pointer and keyboard gestures
pub mod input_constants {
    // Drag distance in pixels before a cube drag resolves to a move.
    pub const DRAG_THRESHOLD_PX: f32 = 10.0;

    // Minimum |cos| between the drag and a projected face axis.
    pub const MIN_DRAG_ALIGNMENT: f32 = 0.5;

    // Screen length of the synthetic drag produced by arrow keys.
    pub const KEY_GESTURE_LENGTH_PX: f32 = 40.0;

    // Pixels of pinch distance change per zoom step.
    pub const PINCH_PIXELS_PER_STEP: f32 = 40.0;

    // Pixel scroll events are converted to lines with this factor.
    pub const SCROLL_PIXELS_PER_LINE: f32 = 40.0;
}

/// HUD layout
pub mod ui_constants {
    pub const HUD_FONT_SIZE: f32 = 22.0;
    pub const BUTTON_FONT_SIZE: f32 = 18.0;
    pub const BANNER_FONT_SIZE: f32 = 36.0;

    pub const BUTTON_COLOR: [f32; 3] = [0.18, 0.18, 0.24];
    pub const BUTTON_HOVER_COLOR: [f32; 3] = [0.28, 0.28, 0.38];
    pub const BUTTON_DISABLED_COLOR: [f32; 3] = [0.1, 0.1, 0.12];
}
