use crate::animation::{AnimatableProperty, Driver, EasingFunction, OwnerId, TimelineId, TimelineStatus};
use crate::context::Context;
use crate::display::{Color, DisplayList, DrawCommand, Transform, color_from_hex};

/// Centered text with a smoothed scale that can be pulsed.
#[derive(Debug)]
pub struct Label {
    owner: OwnerId,
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub position: [f32; 2],
    scale: TimelineId,
    target_scale: f32,
    pulse: Option<(TimelineId, f32)>,
}

impl Label {
    pub fn new(ctx: &mut Context, text: impl Into<String>, font_size: f32) -> Self {
        let owner = OwnerId::new();
        let scale = start_scale_driver(ctx, owner);
        Self {
            owner,
            text: text.into(),
            font_size,
            color: color_from_hex(0xffffff),
            position: [0.0, 0.0],
            scale,
            target_scale: 1.0,
            pulse: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = [x, y];
    }

    pub fn scale(&self, ctx: &Context) -> f32 {
        ctx.scheduler.timeline_value(self.scale).unwrap_or(1.0)
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    /// Drop the target scale to `down_scale` times its current value for
    /// `duration` seconds, then restore it.
    ///
    /// A pulse started while another is running restores to the value the
    /// first pulse would have restored.
    pub fn pulse_scale(&mut self, ctx: &mut Context, down_scale: f32, duration: f32) {
        let restore = match self.pulse {
            Some((_, restore)) => restore,
            None => self.target_scale,
        };
        self.set_target(ctx, restore * down_scale);
        let hold = ctx.scheduler.tween(
            self.owner,
            AnimatableProperty::Hold,
            0.0,
            1.0,
            duration,
            EasingFunction::Linear,
        );
        self.pulse = Some((hold, restore));
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    /// Poll the pulse hold; call once per frame after the scheduler ticks.
    pub fn update(&mut self, ctx: &mut Context) {
        let Some((hold, restore)) = self.pulse else {
            return;
        };
        match ctx.scheduler.poll(hold) {
            TimelineStatus::Active => {}
            TimelineStatus::Completed { .. } | TimelineStatus::Gone => {
                self.pulse = None;
                self.set_target(ctx, restore);
            }
        }
    }

    pub fn destroy(&mut self, ctx: &mut Context) {
        ctx.scheduler.cancel_owner(self.owner);
        self.pulse = None;
    }

    pub fn draw(&self, ctx: &Context, parent: Transform, list: &mut DisplayList) {
        list.push(DrawCommand::Text {
            text: self.text.clone(),
            font_size: self.font_size,
            color: self.color,
            transform: parent.then(Transform::new(self.position, self.scale(ctx), 1.0)),
        });
    }

    fn set_target(&mut self, ctx: &mut Context, target: f32) {
        self.target_scale = target;
        if !ctx.scheduler.set_target(self.scale, target) {
            self.scale = start_scale_driver(ctx, self.owner);
            ctx.scheduler.set_target(self.scale, target);
        }
    }
}

fn start_scale_driver(ctx: &mut Context, owner: OwnerId) -> TimelineId {
    let button = &ctx.config().button;
    let driver = Driver::smooth(1.0, button.smoothing, button.snap_epsilon);
    ctx.scheduler
        .animate(owner, AnimatableProperty::Scale, driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use playable_config::PlayableConfig;

    const DT: f32 = 1.0 / 60.0;

    fn frame(ctx: &mut Context, label: &mut Label) {
        ctx.scheduler.tick(DT);
        label.update(ctx);
    }

    #[test]
    fn test_pulse_then_restore() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut label = Label::new(&mut ctx, "Win", 70.0);

        label.pulse_scale(&mut ctx, 0.95, 0.1);
        assert!(label.is_pulsing());
        assert_eq!(label.target_scale(), 0.95);

        frame(&mut ctx, &mut label);
        assert!(label.scale(&ctx) < 1.0);

        for _ in 0..10 {
            frame(&mut ctx, &mut label);
        }
        assert!(!label.is_pulsing());
        assert_eq!(label.target_scale(), 1.0);

        for _ in 0..60 {
            frame(&mut ctx, &mut label);
        }
        assert_eq!(label.scale(&ctx), 1.0);
    }

    #[test]
    fn test_overlapping_pulses_restore_original() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut label = Label::new(&mut ctx, "Score", 24.0);

        label.pulse_scale(&mut ctx, 0.5, 0.1);
        label.pulse_scale(&mut ctx, 0.5, 0.1);
        assert_eq!(label.target_scale(), 0.5);

        for _ in 0..12 {
            frame(&mut ctx, &mut label);
        }
        assert_eq!(label.target_scale(), 1.0);
    }

    #[test]
    fn test_draw_and_destroy() {
        let mut ctx = Context::with_defaults(PlayableConfig::default());
        let mut label = Label::new(&mut ctx, "Final scene", 40.0);
        label.set_position(360.0, 640.0);

        let mut list = DisplayList::new(720.0, 1280.0);
        label.draw(&ctx, Transform::IDENTITY, &mut list);
        assert_eq!(list.texts(), vec!["Final scene"]);
        assert_eq!(list.commands[0].transform().translation, [360.0, 640.0]);

        label.destroy(&mut ctx);
        assert_eq!(ctx.scheduler.owner_count(label.owner()), 0);
    }
}
