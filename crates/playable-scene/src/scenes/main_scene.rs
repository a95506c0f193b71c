use tracing::debug;

use crate::context::Context;
use crate::display::{DisplayList, Transform, color_from_hex};
use crate::elements::button::{Button, ButtonStyle};
use crate::scene::{
    PointerEvent, Scene, SceneEvent, SceneKind, SceneResult, SceneRoot,
};

const BUTTON_SPACING: f32 = 60.0;

/// Landing scene: an install call-to-action with the hand cue and a button
/// that moves on to the final scene.
#[derive(Debug)]
pub struct MainScene {
    root: SceneRoot,
    install: Button,
    go_final: Button,
}

impl MainScene {
    pub fn new(ctx: &mut Context) -> Self {
        let mut install = Button::new(
            ctx,
            "Install",
            ButtonStyle {
                width: 300.0,
                height: 80.0,
                font_size: 56.0,
                background: color_from_hex(0x025537),
                text_color: color_from_hex(0xfaed6d),
                ..ButtonStyle::default()
            },
        );
        install.show_cue(ctx);

        let go_final = Button::new(
            ctx,
            "Go to Final",
            ButtonStyle {
                width: 300.0,
                height: 80.0,
                font_size: 40.0,
                background: color_from_hex(0x4a5568),
                text_color: color_from_hex(0xffffff),
                ..ButtonStyle::default()
            },
        );

        let mut scene = Self {
            root: SceneRoot::new(),
            install,
            go_final,
        };
        let (width, height) = (ctx.viewport().width(), ctx.viewport().height());
        scene.resize(ctx, width, height);
        scene
    }

    pub fn create(ctx: &mut Context) -> Box<dyn Scene> {
        Box::new(Self::new(ctx))
    }

    pub fn install_button(&self) -> &Button {
        &self.install
    }

    pub fn install_button_mut(&mut self) -> &mut Button {
        &mut self.install
    }

    pub fn final_button(&self) -> &Button {
        &self.go_final
    }
}

impl Scene for MainScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Main
    }

    fn root(&self) -> &SceneRoot {
        &self.root
    }

    fn root_mut(&mut self) -> &mut SceneRoot {
        &mut self.root
    }

    fn resize(&mut self, _ctx: &mut Context, width: f32, height: f32) {
        self.install
            .set_position(width / 2.0, height / 2.0 - BUTTON_SPACING);
        self.go_final
            .set_position(width / 2.0, height / 2.0 + BUTTON_SPACING);
    }

    fn pointer_down(&mut self, ctx: &mut Context, event: PointerEvent) -> SceneResult {
        for button in [&mut self.install, &mut self.go_final] {
            if button.contains(event.x, event.y) && button.pointer_down(ctx) {
                return SceneResult::Handled;
            }
        }
        SceneResult::Ignored
    }

    fn pointer_up(&mut self, ctx: &mut Context, _event: PointerEvent) -> SceneResult {
        let mut result = SceneResult::Ignored;
        if self.install.pointer_up(ctx) {
            debug!("install clicked");
            self.root.emit(SceneEvent::InstallRequested);
            result = SceneResult::Handled;
        }
        if self.go_final.pointer_up(ctx) {
            debug!("go to final clicked");
            self.root.emit(SceneEvent::SwitchScene(SceneKind::Final));
            result = SceneResult::Handled;
        }
        result
    }

    fn pointer_cancel(&mut self, ctx: &mut Context) {
        self.install.cancel_press(ctx);
        self.go_final.cancel_press(ctx);
    }

    fn draw_content(&self, ctx: &Context, parent: Transform, list: &mut DisplayList) {
        self.install.draw(ctx, parent, list);
        self.go_final.draw(ctx, parent, list);
    }

    fn teardown(&mut self, ctx: &mut Context) {
        self.install.destroy(ctx);
        self.go_final.destroy(ctx);
    }
}
