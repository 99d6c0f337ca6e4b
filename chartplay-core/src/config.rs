use std::path::{Path, PathBuf};

use serde::Deserialize;

use chartplay_types::MapTime;

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    playback: PlaybackSection,
}

#[derive(Deserialize, Default)]
struct PlaybackSection {
    hittable_object_enter: Option<MapTime>,
    hittable_laser_enter: Option<MapTime>,
    alert_laser_threshold: Option<MapTime>,
    hittable_object_leave: Option<MapTime>,
    audio_offset: Option<MapTime>,
    early_visibility: Option<MapTime>,
    constant_rate: Option<bool>,
}

/// Horizons and offsets used by [`ChartPlayback`](crate::ChartPlayback).
///
/// All times are in milliseconds. The horizons stay fixed for the whole
/// session; tempo changes do not rescale them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Lookahead before buttons and holds enter the hittable set
    pub hittable_object_enter: MapTime,
    /// Lookahead before lasers enter the hittable set
    pub hittable_laser_enter: MapTime,
    /// Lookahead for [`PlaybackEvent::LaserAlertEntered`](crate::PlaybackEvent)
    pub alert_laser_threshold: MapTime,
    /// Trailing time after which an object leaves
    pub hittable_object_leave: MapTime,
    pub audio_offset: MapTime,
    pub early_visibility: MapTime,
    /// Fixed-rate scrolling, independent of tempo
    pub constant_rate: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            hittable_object_enter: 250,
            hittable_laser_enter: 1000,
            alert_laser_threshold: 1500,
            hittable_object_leave: 150,
            audio_offset: 0,
            early_visibility: 200,
            constant_rate: false,
        }
    }
}

impl PlaybackConfig {
    /// Embedded defaults merged with the user's config file, if any.
    ///
    /// A missing user file is not an error; an unreadable or malformed one is
    /// logged and ignored.
    pub fn load() -> Self {
        let mut base = embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match read_file(&path) {
                    Ok(user) => merge_playback(&mut base.playback, user.playback),
                    Err(e) => log::warn!(target: "config", "ignoring config: {}", e),
                }
            }
        }

        Self::from_section(base.playback)
    }

    /// Embedded defaults merged with the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut base = embedded();
        let user = read_file(path)?;
        merge_playback(&mut base.playback, user.playback);
        Ok(Self::from_section(base.playback))
    }

    fn from_section(section: PlaybackSection) -> Self {
        let fallback = Self::default();
        Self {
            hittable_object_enter: section
                .hittable_object_enter
                .unwrap_or(fallback.hittable_object_enter),
            hittable_laser_enter: section
                .hittable_laser_enter
                .unwrap_or(fallback.hittable_laser_enter),
            alert_laser_threshold: section
                .alert_laser_threshold
                .unwrap_or(fallback.alert_laser_threshold),
            hittable_object_leave: section
                .hittable_object_leave
                .unwrap_or(fallback.hittable_object_leave),
            audio_offset: section.audio_offset.unwrap_or(fallback.audio_offset),
            early_visibility: section
                .early_visibility
                .unwrap_or(fallback.early_visibility),
            constant_rate: section.constant_rate.unwrap_or(fallback.constant_rate),
        }
    }
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!(target: "config", "embedded config.toml is malformed: {}", e);
        ConfigFile::default()
    })
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chartplay").join("config.toml"))
}

fn merge_playback(base: &mut PlaybackSection, user: PlaybackSection) {
    if user.hittable_object_enter.is_some() {
        base.hittable_object_enter = user.hittable_object_enter;
    }
    if user.hittable_laser_enter.is_some() {
        base.hittable_laser_enter = user.hittable_laser_enter;
    }
    if user.alert_laser_threshold.is_some() {
        base.alert_laser_threshold = user.alert_laser_threshold;
    }
    if user.hittable_object_leave.is_some() {
        base.hittable_object_leave = user.hittable_object_leave;
    }
    if user.audio_offset.is_some() {
        base.audio_offset = user.audio_offset;
    }
    if user.early_visibility.is_some() {
        base.early_visibility = user.early_visibility;
    }
    if user.constant_rate.is_some() {
        base.constant_rate = user.constant_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let base = embedded();
        assert_eq!(PlaybackConfig::from_section(base.playback), PlaybackConfig::default());
    }

    #[test]
    fn load_from_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[playback]\nhittable_object_enter = 1000\nconstant_rate = true\n",
        )
        .unwrap();

        let config = PlaybackConfig::load_from(&path).unwrap();
        assert_eq!(config.hittable_object_enter, 1000);
        assert!(config.constant_rate);
        assert_eq!(config.hittable_object_leave, 150);
        assert_eq!(config.alert_laser_threshold, 1500);
    }

    #[test]
    fn load_from_empty_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(
            PlaybackConfig::load_from(&path).unwrap(),
            PlaybackConfig::default()
        );
    }

    #[test]
    fn load_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[playback]\nhittable_object_enter = \"soon\"\n").unwrap();
        assert!(matches!(
            PlaybackConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            PlaybackConfig::load_from(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
