//! Scene trait and the upward events scenes emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::OwnerId;
use crate::context::Context;
use crate::display::{DisplayList, Transform};
use crate::elements::popup::Overlay;
use crate::error::SceneError;

/// Every scene the playable knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Main,
    Final,
}

impl SceneKind {
    pub const ALL: [SceneKind; 2] = [SceneKind::Main, SceneKind::Final];

    pub fn name(&self) -> &'static str {
        match self {
            SceneKind::Main => "main",
            SceneKind::Final => "final",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(SceneKind::Main),
            "final" => Ok(SceneKind::Final),
            _ => Err(SceneError::UnknownSceneKind(s.to_string())),
        }
    }
}

/// Request emitted by scene content, handled by the scene host or passed
/// further up to the shell.
#[derive(Debug)]
pub enum SceneEvent {
    SwitchScene(SceneKind),
    ShowOverlay(Box<dyn Overlay>),
    HideOverlay,
    InstallRequested,
}

/// Result of routing a pointer event into a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneResult {
    Handled,
    Ignored,
}

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// State every scene carries: its timeline owner, the opacity written by the
/// host, the destroyed flag and the outgoing event buffer.
#[derive(Debug)]
pub struct SceneRoot {
    owner: OwnerId,
    opacity: f32,
    destroyed: bool,
    events: Vec<SceneEvent>,
}

impl Default for SceneRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRoot {
    pub fn new() -> Self {
        Self {
            owner: OwnerId::new(),
            opacity: 1.0,
            destroyed: false,
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn emit(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    pub fn transform(&self) -> Transform {
        Transform::new([0.0, 0.0], 1.0, self.opacity)
    }
}

/// A full-screen scene owned by the `SceneHost`.
///
/// Implementors provide `root`/`root_mut` and their content hooks; opacity,
/// event draining and teardown bookkeeping come from the default methods.
pub trait Scene: Send + fmt::Debug {
    fn kind(&self) -> SceneKind;

    fn root(&self) -> &SceneRoot;

    fn root_mut(&mut self) -> &mut SceneRoot;

    /// Lay out content for a new viewport size.
    fn resize(&mut self, ctx: &mut Context, width: f32, height: f32);

    /// Called when the scene becomes current, after its fade-in completes.
    fn on_enter(&mut self, _ctx: &mut Context) {}

    /// Per-frame hook, after the scheduler ticks.
    fn update(&mut self, _ctx: &mut Context) {}

    fn pointer_down(&mut self, _ctx: &mut Context, _event: PointerEvent) -> SceneResult {
        SceneResult::Ignored
    }

    fn pointer_up(&mut self, _ctx: &mut Context, _event: PointerEvent) -> SceneResult {
        SceneResult::Ignored
    }

    /// The release was taken by something else; drop presses without
    /// emitting clicks.
    fn pointer_cancel(&mut self, _ctx: &mut Context) {}

    /// Emit content draw commands under `parent`.
    fn draw_content(&self, ctx: &Context, parent: Transform, list: &mut DisplayList);

    /// Release content timelines.
    fn teardown(&mut self, _ctx: &mut Context) {}

    fn owner(&self) -> OwnerId {
        self.root().owner
    }

    fn opacity(&self) -> f32 {
        self.root().opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.root_mut().opacity = opacity.clamp(0.0, 1.0);
    }

    fn is_destroyed(&self) -> bool {
        self.root().destroyed
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.root_mut().events)
    }

    fn draw(&self, ctx: &Context, list: &mut DisplayList) {
        self.draw_content(ctx, self.root().transform(), list);
    }

    /// Cancel every owned timeline and mark the scene destroyed. Idempotent.
    fn destroy(&mut self, ctx: &mut Context) {
        if self.is_destroyed() {
            return;
        }
        self.teardown(ctx);
        ctx.scheduler.cancel_owner(self.owner());
        for event in self.drain_events() {
            if let SceneEvent::ShowOverlay(mut overlay) = event {
                overlay.destroy(ctx);
            }
        }
        self.root_mut().destroyed = true;
    }
}
