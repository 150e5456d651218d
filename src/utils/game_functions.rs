//! HUD, buttons, win banner and sound cues.
use bevy::prelude::*;

use crate::puzzle::moves::MoveSource;
use crate::puzzle::session::{Session, SessionEvent, Status, format_elapsed};
use crate::utils::constants::ui_constants::{
    BANNER_FONT_SIZE, BUTTON_COLOR, BUTTON_DISABLED_COLOR, BUTTON_FONT_SIZE, BUTTON_HOVER_COLOR,
    HUD_FONT_SIZE,
};
use crate::utils::inputs::is_action_enabled;
use crate::utils::objects::{
    ButtonAction, MoveCounterText, SessionNotice, SettingsText, StatusOverride, StatusText,
    TimerText, UIEntity, WinBanner,
};
use crate::utils::settings::Settings;

const TURN_SOUND: &str = "sounds/turn.ogg";
const WIN_SOUND: &str = "sounds/win.ogg";

/// Sound handles. `None` when the asset is not shipped.
#[derive(Resource, Default)]
pub struct SoundCues {
    pub turn: Option<Handle<AudioSource>>,
    pub win: Option<Handle<AudioSource>>,
}

fn rgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

fn hud_text(text: impl Into<String>) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

/// Spawns the HUD: status lines top-left, buttons along the bottom.
pub fn setup_playing_ui(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            UIEntity,
        ))
        .with_children(|parent| {
            parent.spawn((hud_text(Status::Ready.to_string()), StatusText));
            parent.spawn((hud_text("Moves: 0"), MoveCounterText));
            parent.spawn((hud_text(format_elapsed(Default::default())), TimerText));
            parent.spawn((hud_text(""), SettingsText));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(8.0),
                row_gap: Val::Px(8.0),
                ..default()
            },
            UIEntity,
        ))
        .with_children(|parent| {
            for action in ButtonAction::ALL {
                parent
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderRadius::all(Val::Px(6.0)),
                        BackgroundColor(rgb(BUTTON_COLOR)),
                        action,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(action.label()),
                            TextFont {
                                font_size: BUTTON_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });
}

/// Refreshes status, move counter, timer and settings lines.
pub fn update_hud(
    session: Res<Session>,
    settings: Res<Settings>,
    status_override: Res<StatusOverride>,
    mut status_text: Query<
        &mut Text,
        (
            With<StatusText>,
            Without<MoveCounterText>,
            Without<TimerText>,
            Without<SettingsText>,
        ),
    >,
    mut counter_text: Query<
        &mut Text,
        (With<MoveCounterText>, Without<TimerText>, Without<SettingsText>),
    >,
    mut timer_text: Query<&mut Text, (With<TimerText>, Without<SettingsText>)>,
    mut settings_text: Query<&mut Text, With<SettingsText>>,
) {
    let status = match &status_override.text {
        Some(text) => text.clone(),
        None => session.status().to_string(),
    };
    for mut text in &mut status_text {
        set_if_changed(&mut text, &status);
    }
    let moves = format!("Moves: {}", session.move_count());
    for mut text in &mut counter_text {
        set_if_changed(&mut text, &moves);
    }
    let elapsed = format_elapsed(session.elapsed());
    for mut text in &mut timer_text {
        set_if_changed(&mut text, &elapsed);
    }
    let line = format!(
        "Difficulty: {} | Speed: {} | Sound: {} | Theme: {}",
        settings.difficulty.label(),
        settings.speed.label(),
        if settings.sound_enabled { "on" } else { "off" },
        settings.theme.label(),
    );
    for mut text in &mut settings_text {
        set_if_changed(&mut text, &line);
    }
}

fn set_if_changed(text: &mut Mut<Text>, value: &str) {
    if text.0 != value {
        text.0 = value.to_string();
    }
}

/// Greys out buttons whose action is currently unavailable.
pub fn update_buttons(
    session: Res<Session>,
    mut buttons: Query<(&ButtonAction, &Interaction, &mut BackgroundColor)>,
) {
    for (action, interaction, mut background) in &mut buttons {
        let color = if !is_action_enabled(*action, &session) {
            BUTTON_DISABLED_COLOR
        } else if *interaction == Interaction::None {
            BUTTON_COLOR
        } else {
            BUTTON_HOVER_COLOR
        };
        let color = rgb(color);
        if background.0 != color {
            background.0 = color;
        }
    }
}

/// Shows the win banner while the session holds a win.
pub fn update_win_banner(
    mut commands: Commands,
    session: Res<Session>,
    banners: Query<Entity, With<WinBanner>>,
) {
    match (session.win(), banners.is_empty()) {
        (Some(win), true) => {
            let text = format!(
                "SOLVED!\nTime: {}\nMoves: {}",
                format_elapsed(win.final_time),
                win.move_count
            );
            commands
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        top: Val::Percent(12.0),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    WinBanner,
                    UIEntity,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(text),
                        TextFont {
                            font_size: BANNER_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.85, 0.2)),
                        TextLayout::new_with_justify(Justify::Center),
                    ));
                });
        }
        (None, false) => {
            for entity in &banners {
                commands.entity(entity).despawn();
            }
        }
        _ => {}
    }
}

/// Loads the sound cues that exist on disk. Missing files mean silence.
pub fn load_sound_cues(mut commands: Commands, asset_server: Res<AssetServer>) {
    let load = |path: &str| {
        if sound_asset_exists(path) {
            Some(asset_server.load(path.to_string()))
        } else {
            info!("Sound asset {path} not found, playing without it");
            None
        }
    };
    commands.insert_resource(SoundCues {
        turn: load(TURN_SOUND),
        win: load(WIN_SOUND),
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn sound_asset_exists(path: &str) -> bool {
    std::path::Path::new("assets").join(path).exists()
}

#[cfg(target_arch = "wasm32")]
fn sound_asset_exists(_path: &str) -> bool {
    true
}

/// Plays a click for every hand move and a chime on a win.
pub fn play_sound_cues(
    mut commands: Commands,
    mut notices: MessageReader<SessionNotice>,
    settings: Res<Settings>,
    cues: Res<SoundCues>,
) {
    for SessionNotice(event) in notices.read() {
        if !settings.sound_enabled {
            continue;
        }
        let cue = match event {
            SessionEvent::MoveStarted(mv) if mv.source == MoveSource::Manual => &cues.turn,
            SessionEvent::Won(_) => &cues.win,
            _ => continue,
        };
        if let Some(handle) = cue {
            commands.spawn((AudioPlayer::new(handle.clone()), PlaybackSettings::DESPAWN));
        }
    }
}
