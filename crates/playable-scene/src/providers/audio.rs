use playable_config::SoundConfig;
use thiserror::Error;
use tracing::{debug, warn};

pub const CLICK_SOUND: &str = "button_click";
pub const WIN_SOUND: &str = "win";
pub const MUSIC_SOUND: &str = "bg";

/// Errors reported by an audio backend. Never propagated past `SoundBoard`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("sound not found: {0}")]
    NotFound(String),

    #[error("audio backend failure: {0}")]
    Backend(String),
}

/// Per-request playback settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    pub volume: f32,
    pub looped: bool,
}

/// Playback device the sound board talks to.
pub trait AudioBackend: Send {
    fn play(&mut self, key: &str, options: PlayOptions) -> Result<(), AudioError>;
    fn stop(&mut self, key: &str) -> Result<(), AudioError>;
    fn set_master_volume(&mut self, volume: f32) -> Result<(), AudioError>;
    fn is_playing(&self, key: &str) -> bool;
}

/// Backend that accepts every request and plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, _key: &str, _options: PlayOptions) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self, _key: &str) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_master_volume(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn is_playing(&self, _key: &str) -> bool {
        false
    }
}

/// Fire-and-forget sound playback with a global mute switch.
///
/// While muted nothing reaches the backend except the master volume change.
/// Backend failures are logged and dropped.
pub struct SoundBoard {
    backend: Box<dyn AudioBackend>,
    enabled: bool,
    config: SoundConfig,
}

impl std::fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBoard")
            .field("enabled", &self.enabled)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SoundBoard {
    pub fn new(backend: Box<dyn AudioBackend>, config: &SoundConfig) -> Self {
        let mut board = Self {
            backend,
            enabled: true,
            config: config.clone(),
        };
        if config.muted {
            board.mute();
        }
        board
    }

    pub fn silent(config: &SoundConfig) -> Self {
        Self::new(Box::new(SilentAudio), config)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play_effect(&mut self, key: &str, volume: f32) {
        if !self.enabled {
            return;
        }
        let result = self.backend.play(
            key,
            PlayOptions {
                volume,
                looped: false,
            },
        );
        if let Err(err) = result {
            warn!(key, %err, "failed to play sound effect");
        }
    }

    /// Start a looping sound unless it is already playing.
    pub fn play_loop(&mut self, key: &str, volume: f32) {
        if !self.enabled || self.backend.is_playing(key) {
            return;
        }
        let result = self.backend.play(
            key,
            PlayOptions {
                volume,
                looped: true,
            },
        );
        if let Err(err) = result {
            warn!(key, %err, "failed to start looping sound");
        }
    }

    pub fn stop(&mut self, key: &str) {
        if let Err(err) = self.backend.stop(key) {
            warn!(key, %err, "failed to stop sound");
        }
    }

    pub fn mute(&mut self) {
        self.enabled = false;
        self.apply_master_volume(0.0);
        debug!("sound muted");
    }

    pub fn unmute(&mut self) {
        self.enabled = true;
        self.apply_master_volume(1.0);
        debug!("sound unmuted");
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.mute();
        } else {
            self.unmute();
        }
    }

    pub fn play_click(&mut self) {
        self.play_effect(CLICK_SOUND, self.config.click_volume);
    }

    pub fn play_win(&mut self) {
        self.play_effect(WIN_SOUND, self.config.win_volume);
    }

    pub fn play_background_music(&mut self) {
        self.play_loop(MUSIC_SOUND, self.config.music_volume);
    }

    pub fn stop_background_music(&mut self) {
        self.stop(MUSIC_SOUND);
    }

    fn apply_master_volume(&mut self, volume: f32) {
        if let Err(err) = self.backend.set_master_volume(volume) {
            warn!(%err, "failed to set master volume");
        }
    }
}
