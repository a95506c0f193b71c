//! Single-slot overlay host.
//!
//! At most one overlay is current. Showing a new overlay while another is
//! visible dismisses the current one first. Only one reveal or dismiss is in
//! flight at a time; requests arriving meanwhile are queued and replayed in
//! order once the transition settles.

use std::collections::VecDeque;

use tracing::debug;

use crate::context::Context;
use crate::display::DisplayList;
use crate::elements::popup::{Overlay, PanelSettled};
use crate::viewport::Viewport;

#[derive(Debug)]
enum Request {
    Show(Box<dyn Overlay>),
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Empty,
    Revealing,
    Shown,
    Dismissing,
}

#[derive(Debug, Default)]
pub struct PopupManager {
    current: Option<Box<dyn Overlay>>,
    phase: OverlayPhase,
    pending: VecDeque<Request>,
    viewport: Option<Viewport>,
}

impl PopupManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// True while the slot is occupied, including during its transitions.
    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            OverlayPhase::Revealing | OverlayPhase::Dismissing
        )
    }

    pub fn current(&self) -> Option<&dyn Overlay> {
        self.current.as_deref()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Last viewport seen by `resize`.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Make `overlay` current and reveal it.
    ///
    /// A different overlay already in the slot is dismissed first. Showing the
    /// overlay that is already current restarts its reveal.
    pub fn show(&mut self, ctx: &mut Context, overlay: Box<dyn Overlay>) {
        if self.is_busy() {
            debug!(overlay = ?overlay.id(), "overlay transition in flight, queueing show");
            self.pending.push_back(Request::Show(overlay));
            return;
        }

        match self.current.as_mut() {
            Some(current) if current.id() == overlay.id() => {
                debug!(overlay = ?overlay.id(), "re-showing current overlay");
                current.destroy(ctx);
                self.install(ctx, overlay);
            }
            Some(current) => {
                current.panel_mut().start_dismiss(ctx);
                self.phase = OverlayPhase::Dismissing;
                self.pending.push_front(Request::Show(overlay));
            }
            None => self.install(ctx, overlay),
        }
    }

    /// Dismiss the current overlay and clear the slot. No-op when empty.
    pub fn hide_current(&mut self, ctx: &mut Context) {
        if self.is_busy() {
            self.pending.push_back(Request::Hide);
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.panel_mut().start_dismiss(ctx);
            self.phase = OverlayPhase::Dismissing;
        }
    }

    /// Store the context viewport for the next `show` and forward it to the
    /// current overlay only.
    pub fn resize(&mut self, ctx: &Context) {
        let viewport = ctx.viewport().clone();
        if let Some(current) = self.current.as_mut() {
            current.resize(&viewport, &ctx.config().popup);
        }
        self.viewport = Some(viewport);
    }

    /// Advance the current overlay; call once per frame after the scheduler
    /// ticks.
    pub fn update(&mut self, ctx: &mut Context) {
        if let Some(current) = self.current.as_mut() {
            current.update(ctx);
            match current.panel_mut().update(ctx) {
                Some(PanelSettled::Revealed) => self.phase = OverlayPhase::Shown,
                Some(PanelSettled::Dismissed) => {
                    if let Some(mut overlay) = self.current.take() {
                        debug!(overlay = ?overlay.id(), "overlay hidden");
                        overlay.destroy(ctx);
                    }
                    self.phase = OverlayPhase::Empty;
                }
                None => {}
            }
        }

        while !self.is_busy() {
            let Some(request) = self.pending.pop_front() else {
                break;
            };
            match request {
                Request::Show(overlay) => self.show(ctx, overlay),
                Request::Hide => self.hide_current(ctx),
            }
        }
    }

    pub fn draw(&self, ctx: &Context, list: &mut DisplayList) {
        if let Some(current) = &self.current {
            current.draw(ctx, list);
        }
    }

    /// Drop the current overlay and every queued request without animating.
    pub fn clear(&mut self, ctx: &mut Context) {
        if let Some(mut overlay) = self.current.take() {
            overlay.destroy(ctx);
        }
        for request in self.pending.drain(..) {
            if let Request::Show(mut overlay) = request {
                overlay.destroy(ctx);
            }
        }
        self.phase = OverlayPhase::Empty;
    }

    fn install(&mut self, ctx: &mut Context, mut overlay: Box<dyn Overlay>) {
        if let Some(viewport) = &self.viewport {
            overlay.resize(viewport, &ctx.config().popup);
        }
        debug!(overlay = ?overlay.id(), "showing overlay");
        overlay.panel_mut().start_reveal(ctx);
        self.current = Some(overlay);
        self.phase = OverlayPhase::Revealing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Transform;
    use crate::elements::popup::{OverlayId, PopupPanel};
    use playable_config::PlayableConfig;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Debug)]
    struct Blank {
        id: OverlayId,
        panel: PopupPanel,
    }

    impl Blank {
        fn boxed(id: OverlayId) -> Box<dyn Overlay> {
            Box::new(Self {
                id,
                panel: PopupPanel::new(),
            })
        }
    }

    impl Overlay for Blank {
        fn id(&self) -> OverlayId {
            self.id
        }

        fn panel(&self) -> &PopupPanel {
            &self.panel
        }

        fn panel_mut(&mut self) -> &mut PopupPanel {
            &mut self.panel
        }

        fn draw_content(&self, _ctx: &Context, _panel: Transform, _list: &mut DisplayList) {}
    }

    fn frames(ctx: &mut Context, manager: &mut PopupManager, n: usize) {
        for _ in 0..n {
            ctx.scheduler.tick(DT);
            manager.update(ctx);
        }
    }

    fn context() -> Context {
        Context::with_defaults(PlayableConfig::default())
    }

    #[test]
    fn test_show_then_hide_empties_slot() {
        let mut ctx = context();
        let mut manager = PopupManager::new();

        manager.show(&mut ctx, Blank::boxed(OverlayId::new()));
        assert!(manager.is_showing());
        assert_eq!(manager.phase(), OverlayPhase::Revealing);

        frames(&mut ctx, &mut manager, 40);
        assert_eq!(manager.phase(), OverlayPhase::Shown);
        assert_eq!(manager.current().unwrap().panel().opacity(), 1.0);

        manager.hide_current(&mut ctx);
        frames(&mut ctx, &mut manager, 20);
        assert!(!manager.is_showing());
        assert_eq!(manager.phase(), OverlayPhase::Empty);
        assert_eq!(ctx.scheduler.active_count(), 0);
    }

    #[test]
    fn test_hide_when_empty_is_noop() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        manager.hide_current(&mut ctx);
        assert_eq!(manager.phase(), OverlayPhase::Empty);
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_show_replaces_after_dismiss() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        let first = OverlayId::new();
        let second = OverlayId::new();

        manager.show(&mut ctx, Blank::boxed(first));
        frames(&mut ctx, &mut manager, 40);

        manager.show(&mut ctx, Blank::boxed(second));
        assert_eq!(manager.phase(), OverlayPhase::Dismissing);
        assert_eq!(manager.current().unwrap().id(), first);

        frames(&mut ctx, &mut manager, 20);
        assert_eq!(manager.current().unwrap().id(), second);
        assert_eq!(manager.phase(), OverlayPhase::Revealing);
    }

    #[test]
    fn test_requests_during_reveal_are_queued() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        let first = OverlayId::new();

        manager.show(&mut ctx, Blank::boxed(first));
        manager.hide_current(&mut ctx);
        assert_eq!(manager.pending_count(), 1);
        assert_eq!(manager.phase(), OverlayPhase::Revealing);

        frames(&mut ctx, &mut manager, 40);
        assert_eq!(manager.phase(), OverlayPhase::Dismissing);

        frames(&mut ctx, &mut manager, 20);
        assert!(!manager.is_showing());
    }

    #[test]
    fn test_same_overlay_restarts_reveal() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        let id = OverlayId::new();

        manager.show(&mut ctx, Blank::boxed(id));
        frames(&mut ctx, &mut manager, 40);

        manager.show(&mut ctx, Blank::boxed(id));
        assert_eq!(manager.phase(), OverlayPhase::Revealing);
        assert_eq!(manager.current().unwrap().panel().scale(), 0.0);
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_resize_while_hidden_applies_on_show() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        ctx.set_viewport_size(200.0, 800.0);
        manager.resize(&ctx);

        manager.show(&mut ctx, Blank::boxed(OverlayId::new()));
        let panel = manager.current().unwrap().panel();
        assert_eq!(panel.position(), [100.0, 400.0]);
        assert!((panel.resting_scale() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut ctx = context();
        let mut manager = PopupManager::new();
        manager.show(&mut ctx, Blank::boxed(OverlayId::new()));
        manager.show(&mut ctx, Blank::boxed(OverlayId::new()));
        manager.clear(&mut ctx);
        assert!(!manager.is_showing());
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(ctx.scheduler.active_count(), 0);
    }
}
