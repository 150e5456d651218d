//! Start-up for the rubiks_3d_game, with window and plugins.

use bevy::{prelude::*, window::*};

use rubiks_3d_game::utils::{
    debug_functions::DebugFunctionsPlugin, systems_logic::SystemsLogicPlugin,
};

/// Entry point for the application
fn main() {
    let window = Some(Window {
        title: "Rubik's Cube".into(),
        #[cfg(target_arch = "wasm32")]
        canvas: Some("#game-canvas".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    });

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.07, 0.07, 0.1)))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: window,
                ..default()
            }),
            SystemsLogicPlugin,
            DebugFunctionsPlugin,
        ))
        .run();
}
