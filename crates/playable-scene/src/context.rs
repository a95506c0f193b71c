//! Shared presentation context.
//!
//! One `Context` is constructed by the shell and lent to every component for
//! the duration of a call. It replaces process-wide singletons: the scheduler,
//! the sound board, the asset provider and the viewport all live here.

use playable_config::PlayableConfig;

use crate::animation::Scheduler;
use crate::providers::{
    AssetCatalog, AssetProvider, AudioBackend, SilentAudio, SoundBoard, Texture, texture_or_empty,
};
use crate::viewport::Viewport;

pub struct Context {
    pub scheduler: Scheduler,
    pub sound: SoundBoard,
    assets: Box<dyn AssetProvider>,
    viewport: Viewport,
    config: PlayableConfig,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("scheduler", &self.scheduler)
            .field("sound", &self.sound)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        config: PlayableConfig,
        audio: Box<dyn AudioBackend>,
        assets: Box<dyn AssetProvider>,
    ) -> Self {
        let sound = SoundBoard::new(audio, &config.sound);
        let viewport = Viewport::with_breakpoints(
            config.stage.width,
            config.stage.height,
            config.layout.clone(),
        );
        Self {
            scheduler: Scheduler::new(),
            sound,
            assets,
            viewport,
            config,
        }
    }

    /// Silent audio and a catalog built from the configured manifest.
    pub fn with_defaults(config: PlayableConfig) -> Self {
        let assets = AssetCatalog::from_config(&config.assets);
        Self::new(config, Box::new(SilentAudio), Box::new(assets))
    }

    pub fn config(&self) -> &PlayableConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Only the shell writes the viewport.
    pub(crate) fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.update_dimensions(width, height);
    }

    /// Resolve a texture, degrading to an empty placeholder.
    pub fn texture(&self, key: &str) -> Texture {
        texture_or_empty(self.assets.as_ref(), key)
    }
}

static_assertions::assert_impl_all!(Context: Send);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = Context::with_defaults(PlayableConfig::default());
        assert_eq!(ctx.viewport().width(), 720.0);
        assert_eq!(ctx.viewport().height(), 1280.0);
        assert!(ctx.sound.is_enabled());
        assert_eq!(ctx.texture("hand").width, 128.0);
        assert!(ctx.texture("missing").is_empty());
    }

    #[test]
    fn test_muted_config() {
        let mut config = PlayableConfig::default();
        config.sound.muted = true;
        let ctx = Context::with_defaults(config);
        assert!(!ctx.sound.is_enabled());
    }
}
