//! The playable shell: owns the context and both hosts and is driven by an
//! external frame clock.

use playable_config::PlayableConfig;
use tracing::{debug, info, trace};

use crate::context::Context;
use crate::display::DisplayList;
use crate::elements::popup::Overlay;
use crate::error::Result;
use crate::popup_manager::PopupManager;
use crate::providers::{AssetProvider, AudioBackend};
use crate::scene::{PointerEvent, SceneEvent, SceneKind, SceneResult};
use crate::scene_host::{SceneHost, SceneHostState, SceneRegistry};

/// Notifications for the embedding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The player asked to install the advertised app.
    InstallRequested,
}

#[derive(Debug)]
pub struct Playable {
    ctx: Context,
    scenes: SceneHost,
    popups: PopupManager,
    events: Vec<ShellEvent>,
}

impl Playable {
    pub fn new(
        config: PlayableConfig,
        audio: Box<dyn AudioBackend>,
        assets: Box<dyn AssetProvider>,
    ) -> Self {
        Self::with_registry(
            Context::new(config, audio, assets),
            SceneRegistry::with_defaults(),
        )
    }

    /// Silent audio and the configured asset manifest.
    pub fn with_defaults(config: PlayableConfig) -> Self {
        Self::with_registry(Context::with_defaults(config), SceneRegistry::with_defaults())
    }

    pub fn with_registry(ctx: Context, registry: SceneRegistry) -> Self {
        let mut popups = PopupManager::new();
        popups.resize(&ctx);
        Self {
            ctx,
            scenes: SceneHost::new(registry),
            popups,
            events: Vec::new(),
        }
    }

    /// Switch to the configured initial scene and start the background loop.
    pub fn start(&mut self) -> Result<()> {
        let kind: SceneKind = self.ctx.config().stage.initial_scene.parse()?;
        info!(%kind, "starting playable");
        self.scenes.switch_scene(&mut self.ctx, kind)?;
        self.ctx.sound.play_background_music();
        Ok(())
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.ctx.scheduler.tick(dt);
        self.scenes.update(&mut self.ctx);
        self.route_scene_events();
        self.popups.update(&mut self.ctx);

        let frame = self.ctx.scheduler.frame();
        for event in self.ctx.scheduler.drain_events() {
            let kind = if event.is_completed() {
                "completed"
            } else if event.is_cancelled() {
                "cancelled"
            } else {
                "started"
            };
            trace!(
                frame,
                timeline = event.timeline_id().0,
                owner = event.owner().0,
                property = %event.property(),
                kind,
                "timeline event"
            );
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.set_viewport_size(width, height);
        let viewport = self.ctx.viewport();
        debug!(
            width,
            height,
            orientation = ?viewport.orientation(),
            device = ?viewport.device_class(),
            "resize"
        );
        self.scenes.resize(&mut self.ctx, width, height);
        self.popups.resize(&self.ctx);
    }

    pub fn switch_scene(&mut self, kind: SceneKind) -> Result<()> {
        self.scenes.switch_scene(&mut self.ctx, kind)
    }

    /// Switch by scene name, failing on names that match no kind.
    pub fn switch_scene_by_name(&mut self, name: &str) -> Result<()> {
        let kind: SceneKind = name.parse()?;
        self.switch_scene(kind)
    }

    pub fn current_scene_kind(&self) -> Option<SceneKind> {
        self.scenes.current_scene_kind()
    }

    pub fn scene_state(&self) -> SceneHostState {
        self.scenes.state()
    }

    pub fn show_overlay(&mut self, overlay: Box<dyn Overlay>) {
        self.popups.show(&mut self.ctx, overlay);
    }

    pub fn hide_overlay(&mut self) {
        self.popups.hide_current(&mut self.ctx);
    }

    pub fn is_overlay_showing(&self) -> bool {
        self.popups.is_showing()
    }

    /// A showing overlay is modal and swallows pointer input; otherwise the
    /// current scene gets it while no transition is running. A swallowed
    /// release still cancels presses that began before the overlay opened.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> SceneResult {
        if self.popups.is_showing() {
            return SceneResult::Handled;
        }
        let result = self
            .scenes
            .pointer_down(&mut self.ctx, PointerEvent::new(x, y));
        self.route_scene_events();
        result
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> SceneResult {
        if self.popups.is_showing() {
            self.scenes.pointer_cancel(&mut self.ctx);
            return SceneResult::Handled;
        }
        let result = self
            .scenes
            .pointer_up(&mut self.ctx, PointerEvent::new(x, y));
        self.route_scene_events();
        result
    }

    pub fn drain_shell_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }

    /// Scene layer first, overlay on top.
    pub fn display_list(&self) -> DisplayList {
        let viewport = self.ctx.viewport();
        let mut list = DisplayList::new(viewport.width(), viewport.height());
        self.scenes.draw(&self.ctx, &mut list);
        self.popups.draw(&self.ctx, &mut list);
        list
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn scene_host(&self) -> &SceneHost {
        &self.scenes
    }

    pub fn popup_manager(&self) -> &PopupManager {
        &self.popups
    }

    /// Tear down every scene and overlay and stop all sound.
    pub fn shutdown(&mut self) {
        info!("shutting down playable");
        self.popups.clear(&mut self.ctx);
        self.scenes.destroy_all(&mut self.ctx);
        self.ctx.sound.stop_background_music();
        self.ctx.scheduler.clear();
        self.ctx.scheduler.clear_events();
        self.events.clear();
    }

    fn route_scene_events(&mut self) {
        for event in self.scenes.take_events() {
            match event {
                SceneEvent::ShowOverlay(overlay) => self.popups.show(&mut self.ctx, overlay),
                SceneEvent::HideOverlay => self.popups.hide_current(&mut self.ctx),
                SceneEvent::InstallRequested => {
                    info!("install requested");
                    self.events.push(ShellEvent::InstallRequested);
                }
                SceneEvent::SwitchScene(kind) => {
                    // The host resolves switches itself; this arm only sees
                    // requests that raced a teardown.
                    debug!(%kind, "dropping stray scene switch");
                }
            }
        }
    }
}

static_assertions::assert_impl_all!(Playable: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn test_start_with_unknown_initial_scene() {
        let mut config = PlayableConfig::default();
        config.stage.initial_scene = "lobby".to_string();
        let mut playable = Playable::with_defaults(config);

        assert_eq!(
            playable.start(),
            Err(SceneError::UnknownSceneKind("lobby".to_string()))
        );
        assert_eq!(playable.scene_state(), SceneHostState::Idle(None));
    }

    #[test]
    fn test_switch_by_name() {
        let mut playable = Playable::with_defaults(PlayableConfig::default());
        assert!(playable.switch_scene_by_name("bogus").is_err());
        assert!(playable.switch_scene_by_name("final").is_ok());
    }

    #[test]
    fn test_shutdown_without_scenes() {
        let mut playable = Playable::with_defaults(PlayableConfig::default());
        playable.shutdown();
        assert_eq!(playable.current_scene_kind(), None);
        assert!(playable.display_list().is_empty());
    }
}
