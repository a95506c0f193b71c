use crate::context::Context;
use crate::display::{DisplayList, Transform, color_from_hex};
use crate::elements::label::Label;
use crate::elements::popup::{Overlay, OverlayId, PopupPanel};

/// End-of-session popup with a single centered "Win" line.
#[derive(Debug)]
pub struct FinalResultPopup {
    id: OverlayId,
    panel: PopupPanel,
    title: Label,
}

impl FinalResultPopup {
    pub fn new(ctx: &mut Context) -> Self {
        Self::with_id(ctx, OverlayId::new())
    }

    /// Build with a caller-chosen identity so a later `show` of the same
    /// popup counts as a re-show.
    pub fn with_id(ctx: &mut Context, id: OverlayId) -> Self {
        let title = Label::new(ctx, "Win", 70.0).with_color(color_from_hex(0xffffff));
        Self {
            id,
            panel: PopupPanel::new(),
            title,
        }
    }

    pub fn title(&self) -> &Label {
        &self.title
    }
}

impl Overlay for FinalResultPopup {
    fn id(&self) -> OverlayId {
        self.id
    }

    fn panel(&self) -> &PopupPanel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut PopupPanel {
        &mut self.panel
    }

    fn update(&mut self, ctx: &mut Context) {
        self.title.update(ctx);
    }

    fn draw_content(&self, ctx: &Context, panel: Transform, list: &mut DisplayList) {
        self.title.draw(ctx, panel, list);
    }

    fn destroy(&mut self, ctx: &mut Context) {
        self.title.destroy(ctx);
        self.panel.destroy(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;
    use playable_config::PlayableConfig;

    #[test]
    fn test_draws_win_inside_panel() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut popup = FinalResultPopup::new(&mut ctx);
        popup.resize(&Viewport::new(720.0, 1280.0), &ctx.config().popup.clone());

        // Hidden panel draws nothing.
        let mut list = DisplayList::new(720.0, 1280.0);
        popup.draw(&ctx, &mut list);
        assert!(list.is_empty());

        popup.panel_mut().start_reveal(&mut ctx);
        ctx.scheduler.tick(1.0);
        popup.panel_mut().update(&mut ctx);

        let mut list = DisplayList::new(720.0, 1280.0);
        popup.draw(&ctx, &mut list);
        assert_eq!(list.texts(), vec!["Win"]);
        assert_eq!(list.commands[0].transform().translation, [360.0, 640.0]);
    }

    #[test]
    fn test_destroy_releases_timelines() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut popup = FinalResultPopup::new(&mut ctx);
        popup.panel_mut().start_reveal(&mut ctx);
        popup.destroy(&mut ctx);
        assert_eq!(ctx.scheduler.active_count(), 0);
    }
}
