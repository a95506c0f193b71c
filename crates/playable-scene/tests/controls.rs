mod common;

use common::{DT, context_with_audio};
use playable_scene::elements::{Button, ButtonState, ButtonStyle};

#[test]
fn disabled_button_is_silent_and_inert() {
    let (mut ctx, audio) = context_with_audio();
    let mut button = Button::new(&mut ctx, "Install", ButtonStyle::default());

    button.disable(&mut ctx);
    assert!(!button.pointer_down(&mut ctx));
    assert!(!button.pointer_up(&mut ctx));
    assert!(audio.played().is_empty());

    button.enable();
    assert!(button.pointer_down(&mut ctx));
    assert!(button.pointer_up(&mut ctx));
    assert_eq!(audio.played(), vec!["button_click".to_string()]);
}

#[test]
fn rapid_presses_converge_to_rest_scale() {
    let (mut ctx, _) = context_with_audio();
    let mut button = Button::new(&mut ctx, "Go to Final", ButtonStyle::default());

    for i in 0..50 {
        if i % 2 == 0 {
            button.pointer_down(&mut ctx);
        } else {
            button.pointer_up(&mut ctx);
        }
        ctx.scheduler.tick(DT);
    }
    button.pointer_up(&mut ctx);

    let mut frames = 0;
    while button.scale(&ctx) != 1.0 {
        ctx.scheduler.tick(DT);
        frames += 1;
        assert!(frames <= 60, "press scale did not settle");
    }
}

#[test]
fn press_scale_never_leaves_pressed_range() {
    let (mut ctx, _) = context_with_audio();
    let mut button = Button::new(&mut ctx, "Install", ButtonStyle::default());

    button.pointer_down(&mut ctx);
    for _ in 0..10 {
        ctx.scheduler.tick(DT);
        let scale = button.scale(&ctx);
        assert!((0.9..=1.0).contains(&scale));
    }
    button.pointer_up(&mut ctx);
    for _ in 0..60 {
        ctx.scheduler.tick(DT);
        let scale = button.scale(&ctx);
        assert!((0.9..=1.0).contains(&scale));
    }
    assert_eq!(button.scale(&ctx), 1.0);
}

#[test]
fn muted_sound_board_blocks_click() {
    let (mut ctx, audio) = context_with_audio();
    ctx.sound.mute();
    let mut button = Button::new(&mut ctx, "Install", ButtonStyle::default());

    assert!(button.pointer_down(&mut ctx));
    assert!(audio.played().is_empty());

    ctx.sound.unmute();
    button.pointer_up(&mut ctx);
    button.pointer_down(&mut ctx);
    assert_eq!(audio.count("button_click"), 1);
}

#[test]
fn cue_pulse_ignores_presses() {
    let (mut ctx, _) = context_with_audio();
    let mut pressed = Button::new(&mut ctx, "Install", ButtonStyle::default());
    let mut idle = Button::new(&mut ctx, "Install", ButtonStyle::default());
    pressed.show_cue(&mut ctx);
    idle.show_cue(&mut ctx);

    for frame in 0..30 {
        if frame % 3 == 0 {
            pressed.pointer_down(&mut ctx);
        } else {
            pressed.pointer_up(&mut ctx);
        }
        ctx.scheduler.tick(DT);
        assert_eq!(pressed.cue_scale(&ctx), idle.cue_scale(&ctx));
    }
    assert!(pressed.is_cue_visible());

    pressed.hide_cue(&mut ctx);
    assert_eq!(pressed.cue_scale(&ctx), None);
    assert!(idle.cue_scale(&ctx).is_some());
}

#[test]
fn cancelled_press_returns_to_rest_without_click() {
    let (mut ctx, _) = context_with_audio();
    let mut button = Button::new(&mut ctx, "Go to Final", ButtonStyle::default());

    button.pointer_down(&mut ctx);
    button.cancel_press(&mut ctx);
    assert_eq!(button.state(), ButtonState::Normal);
    assert_eq!(button.target_scale(), 1.0);
    assert!(!button.pointer_up(&mut ctx));

    button.disable(&mut ctx);
    button.cancel_press(&mut ctx);
    assert_eq!(button.state(), ButtonState::Disabled);
}
