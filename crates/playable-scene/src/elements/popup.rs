//! Popup panel: the animated root of every overlay.
//!
//! A single `Reveal` timeline (linear 0→1 over the transition duration)
//! drives opacity and scale together. Reveal scale follows the overshoot
//! curve; dismiss scale shrinks linearly to zero. Both are multiplied by the
//! resting scale, which is recomputed on every resize.

use std::sync::atomic::{AtomicU64, Ordering};

use playable_config::PopupConfig;
use tracing::debug;

use crate::animation::{AnimatableProperty, EasingFunction, OwnerId, TimelineId, TimelineStatus};
use crate::context::Context;
use crate::display::{DisplayList, Transform};
use crate::layout::{FitOptions, ScaleMode, fit_to_screen};
use crate::viewport::{Orientation, Viewport};

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an overlay instance, used to detect re-shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl OverlayId {
    pub fn new() -> Self {
        Self(NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelPhase {
    Hidden,
    Revealing(TimelineId),
    Shown,
    Dismissing(TimelineId),
}

/// Transition that finished during `PopupPanel::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSettled {
    Revealed,
    Dismissed,
}

#[derive(Debug)]
pub struct PopupPanel {
    owner: OwnerId,
    phase: PanelPhase,
    position: [f32; 2],
    resting_scale: f32,
    opacity: f32,
    scale: f32,
}

impl Default for PopupPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupPanel {
    /// Hidden panel at opacity 0 and scale 0.
    pub fn new() -> Self {
        Self {
            owner: OwnerId::new(),
            phase: PanelPhase::Hidden,
            position: [0.0, 0.0],
            resting_scale: 1.0,
            opacity: 0.0,
            scale: 0.0,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn resting_scale(&self) -> f32 {
        self.resting_scale
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            PanelPhase::Revealing(_) | PanelPhase::Dismissing(_)
        )
    }

    /// Center the panel and recompute the resting scale from the content
    /// footprint. Landscape viewports bound by height, portrait by width.
    pub fn resize(&mut self, viewport: &Viewport, config: &PopupConfig) {
        let (width, height) = (viewport.width(), viewport.height());
        self.position = [width * 0.5, height * 0.5];

        let options = FitOptions::new(config.content_width, config.content_height, width, height);
        let options = match viewport.orientation() {
            Orientation::Landscape => options
                .with_mode(ScaleMode::Height)
                .with_max_ratio(1.0, config.max_viewport_ratio),
            Orientation::Portrait => options
                .with_mode(ScaleMode::Width)
                .with_max_ratio(config.max_viewport_ratio, 1.0),
        };
        self.resting_scale = fit_to_screen(&options);

        if self.phase == PanelPhase::Shown {
            self.scale = self.resting_scale;
        }
    }

    /// Start (or restart) the reveal from opacity 0 and scale 0.
    pub fn start_reveal(&mut self, ctx: &mut Context) {
        let duration = ctx.config().popup.show_duration;
        let id = self.start_transition(ctx, duration);
        self.opacity = 0.0;
        self.scale = 0.0;
        self.phase = PanelPhase::Revealing(id);
    }

    /// Start the dismiss from opacity 1 and the resting scale.
    pub fn start_dismiss(&mut self, ctx: &mut Context) {
        let duration = ctx.config().popup.hide_duration;
        let id = self.start_transition(ctx, duration);
        self.opacity = 1.0;
        self.scale = self.resting_scale;
        self.phase = PanelPhase::Dismissing(id);
    }

    /// Apply the current transition progress; call once per frame after the
    /// scheduler ticks.
    pub fn update(&mut self, ctx: &mut Context) -> Option<PanelSettled> {
        let (id, revealing) = match self.phase {
            PanelPhase::Revealing(id) => (id, true),
            PanelPhase::Dismissing(id) => (id, false),
            PanelPhase::Hidden | PanelPhase::Shown => return None,
        };

        let popup = &ctx.config().popup;
        let curve = EasingFunction::overshoot(popup.overshoot, popup.overshoot_split);

        match ctx.scheduler.poll(id) {
            TimelineStatus::Active => {
                let t = ctx.scheduler.timeline_value(id).unwrap_or(0.0);
                if revealing {
                    self.opacity = t;
                    self.scale = curve.evaluate(t) * self.resting_scale;
                } else {
                    self.opacity = 1.0 - t;
                    self.scale = (1.0 - t) * self.resting_scale;
                }
                None
            }
            TimelineStatus::Completed { .. } | TimelineStatus::Gone => {
                if revealing {
                    self.opacity = 1.0;
                    self.scale = self.resting_scale;
                    self.phase = PanelPhase::Shown;
                    debug!(owner = ?self.owner, "popup revealed");
                    Some(PanelSettled::Revealed)
                } else {
                    self.opacity = 0.0;
                    self.scale = 0.0;
                    self.phase = PanelPhase::Hidden;
                    debug!(owner = ?self.owner, "popup dismissed");
                    Some(PanelSettled::Dismissed)
                }
            }
        }
    }

    /// Transform for content drawn inside the panel.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.scale, self.opacity)
    }

    pub fn destroy(&mut self, ctx: &mut Context) {
        ctx.scheduler.cancel_owner(self.owner);
        self.phase = PanelPhase::Hidden;
    }

    fn start_transition(&mut self, ctx: &mut Context, duration: f32) -> TimelineId {
        ctx.scheduler.tween(
            self.owner,
            AnimatableProperty::Reveal,
            0.0,
            1.0,
            duration,
            EasingFunction::Linear,
        )
    }
}

/// Modal content hosted by the `PopupManager`.
pub trait Overlay: Send + std::fmt::Debug {
    fn id(&self) -> OverlayId;

    fn panel(&self) -> &PopupPanel;

    fn panel_mut(&mut self) -> &mut PopupPanel;

    fn resize(&mut self, viewport: &Viewport, config: &PopupConfig) {
        self.panel_mut().resize(viewport, config);
    }

    /// Advance content animations. The panel is updated by the manager.
    fn update(&mut self, _ctx: &mut Context) {}

    /// Draw content in panel space; `panel` already carries the panel's
    /// position, scale and opacity.
    fn draw_content(&self, ctx: &Context, panel: Transform, list: &mut DisplayList);

    fn draw(&self, ctx: &Context, list: &mut DisplayList) {
        self.draw_content(ctx, self.panel().transform(), list);
    }

    fn destroy(&mut self, ctx: &mut Context) {
        self.panel_mut().destroy(ctx);
    }
}
