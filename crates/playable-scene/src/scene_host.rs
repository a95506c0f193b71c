//! Scene host: single-slot owner of the visible scene.
//!
//! Scenes are created lazily from a `SceneRegistry` the first time they are
//! requested and destroyed when they are replaced. A switch fades the current
//! scene out by a fixed per-frame step, detaches and destroys it, attaches the
//! new scene and fades it in. The new kind becomes current only once the
//! fade-in completes.
//!
//! Switch requests that arrive while a transition is in flight are queued and
//! run in order afterwards. A request for the kind already in flight (or
//! already last in the queue) is dropped.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{debug, error, info, warn};

use crate::animation::{AnimatableProperty, TimelineId, TimelineStatus};
use crate::context::Context;
use crate::display::DisplayList;
use crate::error::{Result, SceneError};
use crate::scene::{PointerEvent, Scene, SceneEvent, SceneKind, SceneResult};
use crate::scenes::{FinalScene, MainScene};

/// Builds a scene of one kind.
pub type SceneFactory = fn(&mut Context) -> Box<dyn Scene>;

/// Maps scene kinds to their factories.
#[derive(Clone, Default)]
pub struct SceneRegistry {
    factories: HashMap<SceneKind, SceneFactory>,
}

impl std::fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl SceneRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in scene.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SceneKind::Main, MainScene::create);
        registry.register(SceneKind::Final, FinalScene::create);
        registry
    }

    /// Register a factory, replacing any previous one for `kind`.
    pub fn register(&mut self, kind: SceneKind, factory: SceneFactory) -> &mut Self {
        self.factories.insert(kind, factory);
        self
    }

    pub fn contains(&self, kind: SceneKind) -> bool {
        self.factories.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<SceneKind> {
        let mut kinds: Vec<_> = self.factories.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn create(&self, kind: SceneKind, ctx: &mut Context) -> Result<Box<dyn Scene>> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(SceneError::SceneNotRegistered(kind))?;
        Ok(factory(ctx))
    }
}

/// Externally visible host state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneHostState {
    Idle(Option<SceneKind>),
    Transitioning {
        from: Option<SceneKind>,
        to: SceneKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    FadingOut {
        from: SceneKind,
        to: SceneKind,
        timeline: TimelineId,
    },
    FadingIn {
        from: Option<SceneKind>,
        to: SceneKind,
        timeline: TimelineId,
    },
}

#[derive(Debug)]
pub struct SceneHost {
    registry: SceneRegistry,
    /// Retained scenes, attached or not.
    scenes: BTreeMap<SceneKind, Box<dyn Scene>>,
    /// Attached scenes in draw order.
    stage: Vec<SceneKind>,
    current: Option<SceneKind>,
    phase: Phase,
    queue: VecDeque<SceneKind>,
    size: Option<(f32, f32)>,
    outbox: Vec<SceneEvent>,
}

impl SceneHost {
    pub fn new(registry: SceneRegistry) -> Self {
        Self {
            registry,
            scenes: BTreeMap::new(),
            stage: Vec::new(),
            current: None,
            phase: Phase::Idle,
            queue: VecDeque::new(),
            size: None,
            outbox: Vec::new(),
        }
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn state(&self) -> SceneHostState {
        match self.phase {
            Phase::Idle => SceneHostState::Idle(self.current),
            Phase::FadingOut { from, to, .. } => SceneHostState::Transitioning {
                from: Some(from),
                to,
            },
            Phase::FadingIn { from, to, .. } => SceneHostState::Transitioning { from, to },
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Kind of the last scene whose fade-in completed.
    pub fn current_scene_kind(&self) -> Option<SceneKind> {
        self.current
    }

    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.scene(self.current?)
    }

    pub fn scene(&self, kind: SceneKind) -> Option<&dyn Scene> {
        self.scenes.get(&kind).map(|scene| &**scene)
    }

    pub fn scene_mut(&mut self, kind: SceneKind) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.get_mut(&kind).map(|scene| &mut **scene)
    }

    pub fn is_attached(&self, kind: SceneKind) -> bool {
        self.stage.contains(&kind)
    }

    pub fn attached(&self) -> &[SceneKind] {
        &self.stage
    }

    pub fn retained_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn queued(&self) -> impl Iterator<Item = SceneKind> + '_ {
        self.queue.iter().copied()
    }

    /// Request a switch to `kind`.
    ///
    /// Unregistered kinds fail immediately. While idle, switching to the
    /// current kind is a no-op. While a transition is in flight the request
    /// is queued.
    pub fn switch_scene(&mut self, ctx: &mut Context, kind: SceneKind) -> Result<()> {
        if !self.registry.contains(kind) {
            error!(%kind, "switch requested to unregistered scene");
            return Err(SceneError::SceneNotRegistered(kind));
        }

        match self.phase {
            Phase::Idle => {
                if self.current == Some(kind) {
                    debug!(%kind, "scene already current, ignoring switch");
                    return Ok(());
                }
                self.begin(ctx, kind)
            }
            Phase::FadingOut { to, .. } | Phase::FadingIn { to, .. } => {
                if self.queue.back().copied().unwrap_or(to) == kind {
                    debug!(%kind, "switch already pending, ignoring");
                } else {
                    info!(%kind, "transition in flight, queueing switch");
                    self.queue.push_back(kind);
                }
                Ok(())
            }
        }
    }

    /// Forward a viewport change to every retained scene.
    pub fn resize(&mut self, ctx: &mut Context, width: f32, height: f32) {
        self.size = Some((width, height));
        for scene in self.scenes.values_mut() {
            scene.resize(ctx, width, height);
        }
    }

    /// Advance the transition and scene content; call once per frame after
    /// the scheduler ticks.
    pub fn update(&mut self, ctx: &mut Context) {
        for kind in &self.stage {
            if let Some(scene) = self.scenes.get_mut(kind) {
                scene.update(ctx);
            }
        }

        match self.phase {
            Phase::Idle => {}
            Phase::FadingOut { from, to, timeline } => {
                if let Some(opacity) = self.poll_fade(ctx, from, timeline, 0.0) {
                    debug!(%from, opacity, "fade-out complete");
                    self.stage.retain(|kind| *kind != from);
                    if let Some(mut scene) = self.scenes.remove(&from) {
                        scene.destroy(ctx);
                    }
                    self.fade_in(ctx, Some(from), to);
                }
            }
            Phase::FadingIn { from, to, timeline } => {
                if self.poll_fade(ctx, to, timeline, 1.0).is_some() {
                    info!(from = ?from, %to, "scene switch complete");
                    self.current = Some(to);
                    self.phase = Phase::Idle;
                    if let Some(scene) = self.scenes.get_mut(&to) {
                        scene.on_enter(ctx);
                    }
                    self.run_queued(ctx);
                }
            }
        }

        self.dispatch_events(ctx);
    }

    pub fn pointer_down(&mut self, ctx: &mut Context, event: PointerEvent) -> SceneResult {
        let result = match self.interactive_scene() {
            Some(scene) => scene.pointer_down(ctx, event),
            None => SceneResult::Ignored,
        };
        self.dispatch_events(ctx);
        result
    }

    pub fn pointer_up(&mut self, ctx: &mut Context, event: PointerEvent) -> SceneResult {
        let result = match self.interactive_scene() {
            Some(scene) => scene.pointer_up(ctx, event),
            None => SceneResult::Ignored,
        };
        self.dispatch_events(ctx);
        result
    }

    /// Cancel presses on every retained scene, including one that is fading.
    pub fn pointer_cancel(&mut self, ctx: &mut Context) {
        for scene in self.scenes.values_mut() {
            scene.pointer_cancel(ctx);
        }
    }

    /// Events that the host does not handle itself.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn draw(&self, ctx: &Context, list: &mut DisplayList) {
        for kind in &self.stage {
            if let Some(scene) = self.scenes.get(kind) {
                scene.draw(ctx, list);
            }
        }
    }

    /// Destroy every retained scene and reset to the initial state.
    pub fn destroy_all(&mut self, ctx: &mut Context) {
        for (_, mut scene) in std::mem::take(&mut self.scenes) {
            scene.destroy(ctx);
        }
        for event in self.outbox.drain(..) {
            if let SceneEvent::ShowOverlay(mut overlay) = event {
                overlay.destroy(ctx);
            }
        }
        self.stage.clear();
        self.queue.clear();
        self.current = None;
        self.phase = Phase::Idle;
        debug!("scene host torn down");
    }

    fn begin(&mut self, ctx: &mut Context, to: SceneKind) -> Result<()> {
        self.ensure_scene(ctx, to)?;

        let fade_step = ctx.config().scene.fade_step;
        let outgoing = self
            .current
            .and_then(|from| self.scenes.get_mut(&from).map(|scene| (from, scene)));

        match outgoing {
            Some((from, scene)) => {
                info!(%from, %to, "switching scene");
                scene.set_opacity(1.0);
                let timeline =
                    ctx.scheduler
                        .step(scene.owner(), AnimatableProperty::Opacity, 1.0, 0.0, fade_step);
                self.phase = Phase::FadingOut { from, to, timeline };
            }
            None => {
                info!(%to, "showing first scene");
                self.fade_in(ctx, None, to);
            }
        }
        Ok(())
    }

    fn fade_in(&mut self, ctx: &mut Context, from: Option<SceneKind>, to: SceneKind) {
        let fade_step = ctx.config().scene.fade_step;
        let Some(scene) = self.scenes.get_mut(&to) else {
            warn!(%to, "incoming scene vanished before fade-in");
            self.phase = Phase::Idle;
            return;
        };
        scene.set_opacity(0.0);
        let timeline =
            ctx.scheduler
                .step(scene.owner(), AnimatableProperty::Opacity, 0.0, 1.0, fade_step);
        if !self.stage.contains(&to) {
            self.stage.push(to);
        }
        self.phase = Phase::FadingIn { from, to, timeline };
    }

    /// Write the fade value onto `kind`. Returns the final opacity once the
    /// fade has settled.
    fn poll_fade(
        &mut self,
        ctx: &mut Context,
        kind: SceneKind,
        timeline: TimelineId,
        target: f32,
    ) -> Option<f32> {
        let status = ctx.scheduler.poll(timeline);
        let scene = self.scenes.get_mut(&kind);
        match status {
            TimelineStatus::Active => {
                if let (Some(scene), Some(value)) = (scene, ctx.scheduler.timeline_value(timeline)) {
                    scene.set_opacity(value);
                }
                None
            }
            TimelineStatus::Completed { .. } | TimelineStatus::Gone => {
                if let Some(scene) = scene {
                    scene.set_opacity(target);
                }
                Some(target)
            }
        }
    }

    fn ensure_scene(&mut self, ctx: &mut Context, kind: SceneKind) -> Result<()> {
        if self
            .scenes
            .get(&kind)
            .is_some_and(|scene| !scene.is_destroyed())
        {
            return Ok(());
        }

        let mut scene = self.registry.create(kind, ctx)?;
        if let Some((width, height)) = self.size {
            scene.resize(ctx, width, height);
        }
        debug!(%kind, "created scene");
        self.scenes.insert(kind, scene);
        Ok(())
    }

    fn run_queued(&mut self, ctx: &mut Context) {
        while self.is_idle() {
            let Some(kind) = self.queue.pop_front() else {
                break;
            };
            if let Err(err) = self.switch_scene(ctx, kind) {
                warn!(%kind, %err, "queued scene switch failed");
            }
        }
    }

    fn interactive_scene(&mut self) -> Option<&mut Box<dyn Scene>> {
        if !self.is_idle() {
            return None;
        }
        let kind = self.current?;
        self.scenes.get_mut(&kind)
    }

    fn dispatch_events(&mut self, ctx: &mut Context) {
        let mut events = Vec::new();
        for kind in &self.stage {
            if let Some(scene) = self.scenes.get_mut(kind) {
                events.extend(scene.drain_events());
            }
        }

        for event in events {
            match event {
                SceneEvent::SwitchScene(kind) => {
                    if let Err(err) = self.switch_scene(ctx, kind) {
                        warn!(%kind, %err, "scene switch request failed");
                    }
                }
                other => self.outbox.push(other),
            }
        }
    }
}
