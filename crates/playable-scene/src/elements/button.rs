use crate::animation::{AnimatableProperty, Driver, OwnerId, TimelineId};
use crate::context::Context;
use crate::display::{Color, DisplayList, DrawCommand, Transform, color_from_hex, darken};
use crate::providers::Texture;

/// Soft halo drawn behind the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub alpha: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub font_size: f32,
    pub text_color: Color,
    pub background: Color,
    pub glow: Option<Glow>,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 52.0,
            radius: 10.0,
            font_size: 24.0,
            text_color: color_from_hex(0xffffff),
            background: color_from_hex(0x000000),
            glow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Pressed,
    Disabled,
}

#[derive(Debug)]
struct Cue {
    texture: Texture,
    timeline: TimelineId,
}

/// Pressable control with a smoothed press scale and an optional pulsing
/// hand cue.
///
/// The press driver runs for the whole lifetime of the button; `destroy`
/// must be called before the button is dropped.
#[derive(Debug)]
pub struct Button {
    owner: OwnerId,
    pub label: String,
    pub style: ButtonStyle,
    pub position: [f32; 2],
    state: ButtonState,
    press: TimelineId,
    target_scale: f32,
    cue: Option<Cue>,
}

impl Button {
    pub fn new(ctx: &mut Context, label: impl Into<String>, style: ButtonStyle) -> Self {
        let owner = OwnerId::new();
        let press = start_press_driver(ctx, owner);
        Self {
            owner,
            label: label.into(),
            style,
            position: [0.0, 0.0],
            state: ButtonState::Normal,
            press,
            target_scale: 1.0,
            cue: None,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.state == ButtonState::Disabled
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = [x, y];
    }

    /// Current render scale.
    pub fn scale(&self, ctx: &Context) -> f32 {
        ctx.scheduler.timeline_value(self.press).unwrap_or(1.0)
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    /// Hit test against the unscaled bounds, centered on `position`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let half_w = self.style.width / 2.0;
        let half_h = self.style.height / 2.0;
        (x - self.position[0]).abs() <= half_w && (y - self.position[1]).abs() <= half_h
    }

    /// Press-start. Plays the click sound and shrinks toward the pressed
    /// scale. Returns `false` when disabled.
    pub fn pointer_down(&mut self, ctx: &mut Context) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.state = ButtonState::Pressed;
        let pressed = ctx.config().button.pressed_scale;
        self.retarget(ctx, pressed);
        ctx.sound.play_click();
        true
    }

    /// Press-end, inside or outside the bounds. Returns `true` when this
    /// completes a click.
    pub fn pointer_up(&mut self, ctx: &mut Context) -> bool {
        if self.state != ButtonState::Pressed {
            return false;
        }
        self.state = ButtonState::Normal;
        self.retarget(ctx, 1.0);
        true
    }

    /// Drop a press in progress without completing a click.
    pub fn cancel_press(&mut self, ctx: &mut Context) {
        if self.state == ButtonState::Pressed {
            self.state = ButtonState::Normal;
            self.retarget(ctx, 1.0);
        }
    }

    pub fn disable(&mut self, ctx: &mut Context) {
        self.state = ButtonState::Disabled;
        self.retarget(ctx, 1.0);
    }

    pub fn enable(&mut self) {
        if self.state == ButtonState::Disabled {
            self.state = ButtonState::Normal;
        }
    }

    /// Background color as drawn in the current state.
    pub fn background_color(&self, ctx: &Context) -> Color {
        if self.is_disabled() {
            darken(
                self.style.background,
                ctx.config().button.disabled_background_factor,
            )
        } else {
            self.style.background
        }
    }

    /// Label color as drawn in the current state.
    pub fn text_color(&self, ctx: &Context) -> Color {
        if self.is_disabled() {
            darken(self.style.text_color, ctx.config().button.disabled_text_factor)
        } else {
            self.style.text_color
        }
    }

    /// Show the pulsing hand cue at the bottom-right corner.
    pub fn show_cue(&mut self, ctx: &mut Context) {
        let cue = &ctx.config().cue;
        let texture = ctx.texture(&cue.texture);
        let driver = Driver::pulse(cue.base_scale, cue.amplitude, cue.speed);
        let timeline = ctx
            .scheduler
            .animate(self.owner, AnimatableProperty::CueScale, driver);
        self.cue = Some(Cue { texture, timeline });
    }

    pub fn hide_cue(&mut self, ctx: &mut Context) {
        if self.cue.take().is_some() {
            ctx.scheduler
                .cancel_property(self.owner, AnimatableProperty::CueScale);
        }
    }

    pub fn is_cue_visible(&self) -> bool {
        self.cue.is_some()
    }

    pub fn cue_scale(&self, ctx: &Context) -> Option<f32> {
        let cue = self.cue.as_ref()?;
        ctx.scheduler.timeline_value(cue.timeline)
    }

    pub fn destroy(&mut self, ctx: &mut Context) {
        ctx.scheduler.cancel_owner(self.owner);
        self.cue = None;
    }

    pub fn draw(&self, ctx: &Context, parent: Transform, list: &mut DisplayList) {
        let transform = parent.then(Transform::new(self.position, self.scale(ctx), 1.0));
        let size = [self.style.width, self.style.height];

        if let Some(glow) = self.style.glow {
            list.push(DrawCommand::Rect {
                size: [size[0] + glow.size * 2.0, size[1] + glow.size * 2.0],
                radius: self.style.radius + glow.size,
                color: glow.color,
                transform: transform.then(Transform::new([0.0, 0.0], 1.0, glow.alpha)),
            });
        }

        list.push(DrawCommand::Rect {
            size,
            radius: self.style.radius,
            color: self.background_color(ctx),
            transform,
        });
        list.push(DrawCommand::Text {
            text: self.label.clone(),
            font_size: self.style.font_size,
            color: self.text_color(ctx),
            transform,
        });

        if let Some(cue) = &self.cue {
            let scale = ctx
                .scheduler
                .timeline_value(cue.timeline)
                .unwrap_or(ctx.config().cue.base_scale);
            let offset = [self.style.width / 2.0, self.style.height * 0.1];
            list.push(DrawCommand::Sprite {
                texture: cue.texture.clone(),
                anchor: [1.0, 0.0],
                transform: transform.then(Transform::new(offset, scale, 1.0)),
            });
        }
    }

    fn retarget(&mut self, ctx: &mut Context, target: f32) {
        self.target_scale = target;
        if !ctx.scheduler.set_target(self.press, target) {
            // Driver was cancelled from outside; restart it at the target.
            self.press = start_press_driver(ctx, self.owner);
            ctx.scheduler.set_target(self.press, target);
        }
    }
}

fn start_press_driver(ctx: &mut Context, owner: OwnerId) -> TimelineId {
    let button = &ctx.config().button;
    let driver = Driver::smooth(1.0, button.smoothing, button.snap_epsilon);
    ctx.scheduler
        .animate(owner, AnimatableProperty::Scale, driver)
}
