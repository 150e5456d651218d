//! Player settings: difficulty, speed, sound and color theme.
//! Persisted as TOML next to the executable's working directory (native only).

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::puzzle::history::Difficulty;
use crate::puzzle::moves::SpeedPreset;
use crate::puzzle::session::Session;
use crate::utils::constants::cube_constants::{CLASSIC_COLORS, HIGH_CONTRAST_COLORS};
use crate::utils::constants::game_constants::SETTINGS_FILE;
use crate::utils::systems_logic::GameSet;

/// Sticker palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Classic,
    HighContrast,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Theme::Classic => Theme::HighContrast,
            Theme::HighContrast => Theme::Classic,
        }
    }

    /// sRGB sticker colors in face order.
    pub fn palette(self) -> [[f32; 3]; 6] {
        match self {
            Theme::Classic => CLASSIC_COLORS,
            Theme::HighContrast => HIGH_CONTRAST_COLORS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::HighContrast => "high contrast",
        }
    }
}

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub speed: SpeedPreset,
    pub sound_enabled: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            speed: SpeedPreset::default(),
            sound_enabled: true,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = self.to_toml()?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Plugin for loading, applying and saving settings
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_settings())
            .add_systems(
                Update,
                (apply_settings, save_settings)
                    .chain()
                    .after(GameSet::Input)
                    .before(GameSet::Engine),
            );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> Settings {
    Settings::load(Path::new(SETTINGS_FILE)).unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        Settings::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn load_settings() -> Settings {
    Settings::default()
}

/// Pushes the gameplay-relevant settings into the session.
pub fn apply_settings(settings: Res<Settings>, mut session: ResMut<Session>) {
    if !settings.is_changed() {
        return;
    }
    session.set_speed(settings.speed);
    session.set_difficulty(settings.difficulty);
}

fn save_settings(settings: Res<Settings>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    #[cfg(not(target_arch = "wasm32"))]
    if let Err(err) = settings.save(Path::new(SETTINGS_FILE)) {
        warn!("Settings not saved: {err}");
    }
    debug!("Settings: {:?}", *settings);
}
