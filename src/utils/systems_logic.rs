//! Systems logic: input, then the engine tick, then presentation.

use bevy::prelude::*;

use crate::puzzle::session::{Session, SessionEvent};
use crate::utils::camera::Camera3dOrbitPlugin;
use crate::utils::cube::{apply_theme, rebuild_cube, sync_cubie_transforms, update_hint_overlay};
use crate::utils::game_functions::{
    load_sound_cues, play_sound_cues, setup_playing_ui, update_buttons, update_hud,
    update_win_banner,
};
use crate::utils::inputs::InputsPlugin;
use crate::utils::objects::{RandomGen, RebuildCube, SessionNotice, StatusOverride};
use crate::utils::settings::SettingsPlugin;
use crate::utils::setup::setup;
use crate::utils::touch_inputs::TouchInputPlugin;

/// Frame phases. Inputs queue moves, the engine advances, the scene follows.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Engine,
    Present,
}

// Plugin for managing all the game systems.
pub struct SystemsLogicPlugin;

impl Plugin for SystemsLogicPlugin {
    /// Builds the plugin by adding the systems to the app.
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .init_resource::<RandomGen>()
            .init_resource::<StatusOverride>()
            .add_message::<RebuildCube>()
            .add_message::<SessionNotice>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Engine, GameSet::Present).chain(),
            )
            .add_plugins((
                SettingsPlugin,
                InputsPlugin,
                TouchInputPlugin,
                Camera3dOrbitPlugin,
            ))
            .add_systems(Startup, (setup, setup_playing_ui, load_sound_cues))
            .add_systems(Update, tick_session.in_set(GameSet::Engine))
            .add_systems(
                Update,
                (
                    // The rebuild must land before transforms are synced
                    (rebuild_cube, sync_cubie_transforms).chain(),
                    apply_theme,
                    update_hint_overlay,
                    update_hud,
                    update_buttons,
                    update_win_banner,
                    play_sound_cues,
                )
                    .in_set(GameSet::Present),
            );
    }
}

/// Advances the session by the frame time and forwards what happened.
fn tick_session(
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut status: ResMut<StatusOverride>,
    mut notices: MessageWriter<SessionNotice>,
) {
    for event in session.tick(time.delta()) {
        match event {
            SessionEvent::MoveStarted(mv) => {
                status.text = None;
                debug!("Started: {}", mv.twist);
            }
            SessionEvent::MoveAborted(mv) => debug!("Aborted: {}", mv.twist),
            SessionEvent::QueueDrained => debug!("Move queue drained"),
            SessionEvent::MoveCompleted(_) | SessionEvent::Won(_) | SessionEvent::Unsolved => {}
        }
        notices.write(SessionNotice(event));
    }
}
