#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use playable_config::PlayableConfig;
use playable_scene::providers::{AssetCatalog, AudioBackend, AudioError, PlayOptions};
use playable_scene::{Context, Playable, SceneRegistry};

pub const DT: f32 = 1.0 / 60.0;

/// Audio backend that records every playback request.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub played: Arc<Mutex<Vec<String>>>,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }

    pub fn count(&self, key: &str) -> usize {
        self.played.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, key: &str, _options: PlayOptions) -> Result<(), AudioError> {
        self.played.lock().unwrap().push(key.to_string());
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

pub fn context_with_audio() -> (Context, RecordingAudio) {
    let config = PlayableConfig::default();
    let audio = RecordingAudio::default();
    let assets = AssetCatalog::from_config(&config.assets);
    let ctx = Context::new(config, Box::new(audio.clone()), Box::new(assets));
    (ctx, audio)
}

pub fn playable_with_audio() -> (Playable, RecordingAudio) {
    let (ctx, audio) = context_with_audio();
    (Playable::with_registry(ctx, SceneRegistry::with_defaults()), audio)
}

/// Tick until `done` holds, panicking after `limit` frames.
pub fn run_until(playable: &mut Playable, limit: usize, mut done: impl FnMut(&Playable) -> bool) -> usize {
    for frame in 0..limit {
        if done(playable) {
            return frame;
        }
        playable.tick(DT);
    }
    assert!(done(playable), "condition not reached within {limit} frames");
    limit
}
