use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::puzzle::axis::Axis;
use crate::puzzle::gesture::resolve_drag;
use crate::puzzle::history::Difficulty;
use crate::puzzle::moves::{Direction, Twist};
use crate::puzzle::session::{HintOutcome, Session};
use crate::utils::camera::CameraProjector;
use crate::utils::constants::input_constants::KEY_GESTURE_LENGTH_PX;
use crate::utils::objects::{
    ButtonAction, OrbitCamera, PointerState, RandomGen, RebuildCube, StatusOverride,
};
use crate::utils::settings::Settings;
use crate::utils::systems_logic::GameSet;

/// Plugin for handling keyboard and button inputs
pub struct InputsPlugin;

impl Plugin for InputsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_keyboard_input, handle_button_presses, handle_arrow_gestures)
                .in_set(GameSet::Input),
        );
    }
}

/// Face turn bound to a letter key: axis, layer and the unshifted direction.
fn face_key(key: KeyCode) -> Option<(Axis, i32, Direction)> {
    use Direction::{Clockwise, CounterClockwise};
    Some(match key {
        KeyCode::KeyR => (Axis::X, 1, Clockwise),
        KeyCode::KeyL => (Axis::X, -1, CounterClockwise),
        KeyCode::KeyU => (Axis::Y, 1, Clockwise),
        KeyCode::KeyD => (Axis::Y, -1, CounterClockwise),
        KeyCode::KeyF => (Axis::Z, 1, Clockwise),
        KeyCode::KeyB => (Axis::Z, -1, CounterClockwise),
        _ => return None,
    })
}

const FACE_KEYS: [KeyCode; 6] = [
    KeyCode::KeyR,
    KeyCode::KeyL,
    KeyCode::KeyU,
    KeyCode::KeyD,
    KeyCode::KeyF,
    KeyCode::KeyB,
];

/// Whether an on-screen button currently does anything.
pub fn is_action_enabled(action: ButtonAction, session: &Session) -> bool {
    match action {
        ButtonAction::Shuffle => session.is_accepting_input(),
        ButtonAction::Solve => session.can_solve(),
        ButtonAction::Hint => session.can_hint(),
        ButtonAction::Reset
        | ButtonAction::Difficulty
        | ButtonAction::Speed
        | ButtonAction::Sound
        | ButtonAction::Theme => true,
    }
}

/// Everything a game action may touch.
#[derive(SystemParam)]
pub struct GameActions<'w> {
    session: ResMut<'w, Session>,
    settings: ResMut<'w, Settings>,
    random_gen: ResMut<'w, RandomGen>,
    status: ResMut<'w, StatusOverride>,
    rebuild: MessageWriter<'w, RebuildCube>,
}

impl GameActions<'_> {
    pub fn run(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Shuffle => {
                let rng = &mut self.random_gen.random_gen;
                match self.session.shuffle(rng) {
                    Ok(_) => self.status.text = None,
                    Err(err) => debug!("Shuffle ignored: {err}"),
                }
            }
            ButtonAction::Solve => match self.session.solve() {
                Ok(_) => self.status.text = None,
                Err(err) => debug!("Solve ignored: {err}"),
            },
            ButtonAction::Reset => {
                self.session.reset();
                self.status.text = None;
                self.rebuild.write(RebuildCube);
                info!("Cube reset");
            }
            ButtonAction::Hint => match self.session.hint() {
                Ok(HintOutcome::Suggest(twist)) => {
                    self.status.text = Some(format!("Hint: {twist}"));
                }
                Ok(HintOutcome::AlreadySolved) => {
                    self.status.text =
                        Some("Hint: the cube is already solved, no hint needed.".to_string());
                }
                Err(err) => debug!("Hint ignored: {err}"),
            },
            ButtonAction::Difficulty => {
                let next = self.settings.difficulty.next();
                self.set_difficulty(next);
            }
            ButtonAction::Speed => {
                self.settings.speed = self.settings.speed.next();
                info!("Speed: {}", self.settings.speed.label());
            }
            ButtonAction::Sound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                info!("Sound: {}", self.settings.sound_enabled);
            }
            ButtonAction::Theme => {
                self.settings.theme = self.settings.theme.next();
                info!("Theme: {}", self.settings.theme.label());
            }
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        info!("Difficulty: {}", difficulty.label());
    }

    pub fn turn(&mut self, twist: Twist) {
        if let Err(err) = self.session.user_move(twist) {
            debug!("Turn ignored: {err}");
        }
    }
}

/// Handle keyboard inputs
pub fn handle_keyboard_input(keyboard: Res<ButtonInput<KeyCode>>, mut actions: GameActions) {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for key in FACE_KEYS {
        if !keyboard.just_pressed(key) {
            continue;
        }
        let Some((axis, layer, direction)) = face_key(key) else {
            continue;
        };
        let direction = if shift { direction.inverse() } else { direction };
        if let Ok(twist) = Twist::new(axis, layer, direction) {
            actions.turn(twist);
        }
    }

    let bindings = [
        (KeyCode::KeyN, ButtonAction::Shuffle),
        (KeyCode::Enter, ButtonAction::Solve),
        (KeyCode::Backspace, ButtonAction::Reset),
        (KeyCode::KeyH, ButtonAction::Hint),
        (KeyCode::KeyP, ButtonAction::Speed),
        (KeyCode::KeyM, ButtonAction::Sound),
        (KeyCode::KeyT, ButtonAction::Theme),
    ];
    for (key, action) in bindings {
        if keyboard.just_pressed(key) {
            actions.run(action);
        }
    }

    let difficulties = [
        (KeyCode::Digit1, Difficulty::Easy),
        (KeyCode::Digit2, Difficulty::Medium),
        (KeyCode::Digit3, Difficulty::Hard),
    ];
    for (key, difficulty) in difficulties {
        if keyboard.just_pressed(key) {
            actions.set_difficulty(difficulty);
        }
    }
}

/// Arrow keys act like a short drag on the face under the cursor.
pub fn handle_arrow_gestures(
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerState>,
    camera_query: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut session: ResMut<Session>,
) {
    let arrows = [
        (KeyCode::ArrowUp, Vec2::NEG_Y),
        (KeyCode::ArrowDown, Vec2::Y),
        (KeyCode::ArrowLeft, Vec2::NEG_X),
        (KeyCode::ArrowRight, Vec2::X),
    ];
    let Some(hovered) = pointer.hovered else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let projector = CameraProjector {
        camera,
        transform: camera_transform,
    };
    for (key, screen_dir) in arrows {
        if !keyboard.just_pressed(key) {
            continue;
        }
        let Some(twist) = resolve_drag(hovered, screen_dir * KEY_GESTURE_LENGTH_PX, &projector, 0.0)
        else {
            continue;
        };
        if let Err(err) = session.user_move(twist) {
            debug!("Arrow turn ignored: {err}");
        }
    }
}

/// Runs the action of a pressed button, if it is enabled
pub fn handle_button_presses(
    buttons: Query<(&Interaction, &ButtonAction), Changed<Interaction>>,
    mut actions: GameActions,
) {
    for (interaction, action) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if is_action_enabled(*action, &actions.session) {
            actions.run(*action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_keys_follow_the_usual_notation() {
        assert_eq!(
            face_key(KeyCode::KeyR),
            Some((Axis::X, 1, Direction::Clockwise))
        );
        assert_eq!(
            face_key(KeyCode::KeyB),
            Some((Axis::Z, -1, Direction::CounterClockwise))
        );
        assert_eq!(face_key(KeyCode::KeyQ), None);
        for key in FACE_KEYS {
            assert!(face_key(key).is_some());
        }
    }

    #[test]
    fn solve_and_hint_buttons_need_history() {
        let mut session = Session::default();
        assert!(is_action_enabled(ButtonAction::Shuffle, &session));
        assert!(!is_action_enabled(ButtonAction::Solve, &session));
        assert!(!is_action_enabled(ButtonAction::Hint, &session));

        let twist = Twist::new(Axis::Y, 1, Direction::Clockwise).unwrap();
        session.user_move(twist).unwrap();
        assert!(!is_action_enabled(ButtonAction::Shuffle, &session));
        assert!(is_action_enabled(ButtonAction::Reset, &session));
        while !session.is_accepting_input() {
            session.tick(std::time::Duration::from_millis(16));
        }
        assert!(is_action_enabled(ButtonAction::Solve, &session));
        assert!(is_action_enabled(ButtonAction::Hint, &session));
    }
}
