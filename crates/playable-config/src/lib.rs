//! Playable configuration system
//!
//! This crate provides centralized configuration management for the playable
//! presentation core, loading tunables from `playable.toml` with environment
//! variable overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "playable.toml";

/// Errors produced while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`PlayableConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is outside its usable range.
    #[error("invalid config value {field} = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlayableConfig {
    /// Application shell settings
    pub stage: StageConfig,
    /// Scene cross-fade settings
    pub scene: SceneConfig,
    /// Popup reveal/dismiss settings
    pub popup: PopupConfig,
    /// Interactive control (button) settings
    pub button: ButtonConfig,
    /// Directional hand cue settings
    pub cue: CueConfig,
    /// Sound effect settings
    pub sound: SoundConfig,
    /// Viewport classification breakpoints
    pub layout: LayoutConfig,
    /// Asset manifest
    pub assets: AssetsConfig,
}

/// Application shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Scene shown by `start()` (`main` or `final`)
    pub initial_scene: String,
    /// Initial viewport width in logical pixels
    pub width: f32,
    /// Initial viewport height in logical pixels
    pub height: f32,
}

/// Scene transition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Opacity change applied per frame during a cross-fade
    pub fade_step: f32,
}

/// Popup animation and layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Reveal duration in seconds
    pub show_duration: f32,
    /// Dismiss duration in seconds
    pub hide_duration: f32,
    /// Peak scale reached during the reveal, relative to the resting scale
    pub overshoot: f32,
    /// Normalized time at which the overshoot peak is reached
    pub overshoot_split: f32,
    /// Nominal panel content width
    pub content_width: f32,
    /// Nominal panel content height
    pub content_height: f32,
    /// Largest fraction of the bounding viewport axis the panel may cover
    pub max_viewport_ratio: f32,
}

/// Button configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Render scale while pressed
    pub pressed_scale: f32,
    /// Exponential smoothing factor applied per frame
    pub smoothing: f32,
    /// Residual below which the render scale snaps to its target
    pub snap_epsilon: f32,
    /// Channel multiplier for the disabled background
    pub disabled_background_factor: f32,
    /// Channel multiplier for the disabled label
    pub disabled_text_factor: f32,
}

/// Hand cue pulse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    /// Scale the pulse oscillates around
    pub base_scale: f32,
    /// Pulse amplitude
    pub amplitude: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Texture key of the cue sprite
    pub texture: String,
}

/// Sound configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Start with all audio muted
    pub muted: bool,
    /// Button click effect volume
    pub click_volume: f32,
    /// Win effect volume
    pub win_volume: f32,
    /// Background music volume
    pub music_volume: f32,
}

/// Viewport classification breakpoints (widths in logical pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Widths at or below this are extra-small mobile
    pub mobile_xs_max_width: f32,
    /// Widths below this are mobile
    pub tablet_min_width: f32,
    /// Widths at or above this are desktop
    pub desktop_min_width: f32,
}

/// Nominal description of an image asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub width: f32,
    pub height: f32,
}

/// Image manifest. Audio sources are resolved by the audio backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub images: BTreeMap<String, ImageAsset>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            initial_scene: "main".to_string(),
            width: 720.0,
            height: 1280.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { fade_step: 0.05 }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            show_duration: 0.5,
            hide_duration: 0.2,
            overshoot: 1.2,
            overshoot_split: 0.7,
            content_width: 300.0,
            content_height: 300.0,
            max_viewport_ratio: 1.2,
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pressed_scale: 0.9,
            smoothing: 0.15,
            snap_epsilon: 1e-3,
            disabled_background_factor: 0.6,
            disabled_text_factor: 0.7,
        }
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            base_scale: 0.65,
            amplitude: 0.05,
            // 0.05 rad per 60 Hz frame
            speed: 3.0,
            texture: "hand".to_string(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            muted: false,
            click_volume: 0.8,
            win_volume: 0.8,
            music_volume: 0.3,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_xs_max_width: 360.0,
            tablet_min_width: 768.0,
            desktop_min_width: 1024.0,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let mut images = BTreeMap::new();
        images.insert(
            "hand".to_string(),
            ImageAsset {
                path: PathBuf::from("assets/hand.png"),
                width: 128.0,
                height: 128.0,
            },
        );

        Self { images }
    }
}

impl PlayableConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the playable.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation drivers cannot make progress with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fade_step = self.scene.fade_step;
        if !(fade_step.is_finite() && fade_step > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scene.fade_step",
                value: fade_step,
                reason: "must be greater than zero",
            });
        }

        let smoothing = self.button.smoothing;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "button.smoothing",
                value: smoothing,
                reason: "must be in (0, 1]",
            });
        }

        for (field, value) in [
            ("popup.show_duration", self.popup.show_duration),
            ("popup.hide_duration", self.popup.hide_duration),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be a non-negative number of seconds",
                });
            }
        }
        Ok(())
    }

    /// Load configuration from the default location (playable.toml in the current
    /// directory) or return default configuration if the file doesn't exist or is invalid
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                tracing::warn!("{err}; falling back to default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(scene) = std::env::var("PLAYABLE_INITIAL_SCENE") {
            self.stage.initial_scene = scene;
        }
        if let Ok(val) = std::env::var("PLAYABLE_MUTED") {
            self.sound.muted = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("PLAYABLE_FADE_STEP") {
            if let Ok(step) = val.parse::<f32>() {
                if step.is_finite() && step > 0.0 {
                    self.scene.fade_step = step;
                }
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from playable.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PlayableConfig::default();
        assert_eq!(config.stage.initial_scene, "main");
        assert_eq!(config.scene.fade_step, 0.05);
        assert_eq!(config.popup.show_duration, 0.5);
        assert_eq!(config.popup.hide_duration, 0.2);
        assert_eq!(config.button.pressed_scale, 0.9);
        assert!(config.assets.images.contains_key("hand"));
    }

    #[test]
    fn test_toml_serialization() {
        let config = PlayableConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: PlayableConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.popup.overshoot, 1.2);
        assert_eq!(parsed.assets.images.len(), 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[popup]\nshow_duration = 1.0\n\n[stage]\ninitial_scene = \"final\"").unwrap();

        let config = PlayableConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.popup.show_duration, 1.0);
        assert_eq!(config.popup.hide_duration, 0.2);
        assert_eq!(config.stage.initial_scene, "final");
        assert_eq!(config.button.smoothing, 0.15);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = PlayableConfig::load_from_file("does/not/exist/playable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene]\nfade_step = \"fast\"").unwrap();

        let err = PlayableConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_fade_step_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene]\nfade_step = 0.0").unwrap();

        let err = PlayableConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "scene.fade_step",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(PlayableConfig::default().validate().is_ok());

        let mut config = PlayableConfig::default();
        config.button.smoothing = 0.0;
        assert!(config.validate().is_err());

        let mut config = PlayableConfig::default();
        config.popup.hide_duration = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = PlayableConfig::default();
        config.scene.fade_step = -0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("PLAYABLE_INITIAL_SCENE", "final");
            std::env::set_var("PLAYABLE_MUTED", "true");
            std::env::set_var("PLAYABLE_FADE_STEP", "0.1");
        }

        let mut config = PlayableConfig::default();
        config.merge_with_env();

        assert_eq!(config.stage.initial_scene, "final");
        assert!(config.sound.muted);
        assert_eq!(config.scene.fade_step, 0.1);

        unsafe {
            std::env::remove_var("PLAYABLE_INITIAL_SCENE");
            std::env::remove_var("PLAYABLE_MUTED");
            std::env::remove_var("PLAYABLE_FADE_STEP");
        }
    }
}
