use tracing::info;

use crate::context::Context;
use crate::display::{DisplayList, Transform};
use crate::elements::final_result_popup::FinalResultPopup;
use crate::elements::label::Label;
use crate::scene::{Scene, SceneEvent, SceneKind, SceneRoot};

/// Closing scene. Requests the result popup the first time it becomes
/// current.
#[derive(Debug)]
pub struct FinalScene {
    root: SceneRoot,
    title: Label,
    celebrated: bool,
}

impl FinalScene {
    pub fn new(ctx: &mut Context) -> Self {
        let title = Label::new(ctx, "Final scene", 40.0);
        let mut scene = Self {
            root: SceneRoot::new(),
            title,
            celebrated: false,
        };
        let (width, height) = (ctx.viewport().width(), ctx.viewport().height());
        scene.resize(ctx, width, height);
        scene
    }

    pub fn create(ctx: &mut Context) -> Box<dyn Scene> {
        Box::new(Self::new(ctx))
    }

    pub fn title(&self) -> &Label {
        &self.title
    }
}

impl Scene for FinalScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Final
    }

    fn root(&self) -> &SceneRoot {
        &self.root
    }

    fn root_mut(&mut self) -> &mut SceneRoot {
        &mut self.root
    }

    fn resize(&mut self, _ctx: &mut Context, width: f32, height: f32) {
        self.title.set_position(width / 2.0, height / 2.0);
    }

    fn on_enter(&mut self, ctx: &mut Context) {
        if self.celebrated {
            return;
        }
        self.celebrated = true;
        info!("final scene reached, showing result");
        let popup = FinalResultPopup::new(ctx);
        self.root.emit(SceneEvent::ShowOverlay(Box::new(popup)));
        ctx.sound.play_win();
    }

    fn update(&mut self, ctx: &mut Context) {
        self.title.update(ctx);
    }

    fn draw_content(&self, ctx: &Context, parent: Transform, list: &mut DisplayList) {
        self.title.draw(ctx, parent, list);
    }

    fn teardown(&mut self, ctx: &mut Context) {
        self.title.destroy(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playable_config::PlayableConfig;

    #[test]
    fn test_requests_popup_once() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut scene = FinalScene::new(&mut ctx);

        scene.on_enter(&mut ctx);
        let events = scene.drain_events();
        assert!(matches!(events.as_slice(), [SceneEvent::ShowOverlay(_)]));

        scene.on_enter(&mut ctx);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_title_centered() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut scene = FinalScene::new(&mut ctx);
        assert_eq!(scene.title().position, [360.0, 640.0]);

        scene.resize(&mut ctx, 1280.0, 720.0);
        let mut list = DisplayList::new(1280.0, 720.0);
        scene.draw(&ctx, &mut list);
        assert_eq!(list.texts(), vec!["Final scene"]);
        assert_eq!(list.commands[0].transform().translation, [640.0, 360.0]);
    }
}
