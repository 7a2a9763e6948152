use crate::animation::{AnimationTuning, TuningError};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ANIMATION_SETTINGS_FILE_PATH: &str = "./animation.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub tuning: AnimationTuning,
    /// Start spawned actors at a random locomotion phase so crowds do not
    /// walk in lockstep.
    pub randomize_start_phase: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            tuning: AnimationTuning::default(),
            randomize_start_phase: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("failed to read settings file: {0}")]
    Read(std::io::Error),
    #[error("failed to write settings file: {0}")]
    Write(std::io::Error),
    #[error("failed to decode YAML settings: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML settings: {0}")]
    Serialize(serde_yaml::Error),
    #[error("invalid animation tuning: {0}")]
    Invalid(#[from] TuningError),
}

#[derive(Resource, Clone, Debug)]
pub struct SettingsResource {
    pub current: AnimationSettings,
    path: PathBuf,
}

impl SettingsResource {
    pub fn new(current: AnimationSettings) -> Self {
        Self::with_path(current, ANIMATION_SETTINGS_FILE_PATH)
    }

    pub fn with_path(current: AnimationSettings, path: impl Into<PathBuf>) -> Self {
        Self {
            current,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tuning(&self) -> &AnimationTuning {
        &self.current.tuning
    }

    pub fn save_to_disk(&self) -> Result<(), SettingsIoError> {
        write_settings_to_path(&self.current, &self.path)
    }
}

impl Default for SettingsResource {
    fn default() -> Self {
        Self::new(AnimationSettings::default())
    }
}

/// Loads `./animation.yaml` (writing the defaults there when it is missing)
/// and installs it as [`SettingsResource`].
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let path = Path::new(ANIMATION_SETTINGS_FILE_PATH);
        let settings = load_settings_or_default(path);
        if let Err(error) = ensure_settings_file_exists(path, &settings) {
            warn!(
                "Could not write default animation settings to '{}': {}",
                path.display(),
                error
            );
        }
        app.insert_resource(SettingsResource::with_path(settings, path));
    }
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing, unreadable, or holds invalid tuning.
pub fn load_settings_or_default(path: &Path) -> AnimationSettings {
    if !path.exists() {
        return AnimationSettings::default();
    }

    match load_settings_from_path(path) {
        Ok(settings) => {
            info!("Loaded animation settings from '{}'", path.display());
            settings
        }
        Err(error) => {
            warn!(
                "Failed to load animation settings from '{}': {}. Falling back to defaults.",
                path.display(),
                error
            );
            AnimationSettings::default()
        }
    }
}

pub fn ensure_settings_file_exists(
    path: &Path,
    settings: &AnimationSettings,
) -> Result<(), SettingsIoError> {
    if path.exists() {
        return Ok(());
    }

    write_settings_to_path(settings, path)
}

pub fn load_settings_from_path(path: &Path) -> Result<AnimationSettings, SettingsIoError> {
    let raw = fs::read_to_string(path).map_err(SettingsIoError::Read)?;
    let settings =
        serde_yaml::from_str::<AnimationSettings>(&raw).map_err(SettingsIoError::Deserialize)?;
    settings.tuning.validate()?;
    Ok(settings)
}

pub fn write_settings_to_path(
    settings: &AnimationSettings,
    path: &Path,
) -> Result<(), SettingsIoError> {
    let encoded = serde_yaml::to_string(settings).map_err(SettingsIoError::Serialize)?;
    fs::write(path, encoded).map_err(SettingsIoError::Write)
}
