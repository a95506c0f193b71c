//! Headless driver for the playable core.
//!
//! Runs the session on a simulated 60 Hz clock, taps the buttons the way a
//! player would and prints what ends up on screen.
//!
//! ```text
//! cargo run -- --config=playable.toml --frames=240 --size=720x1280
//! ```

use anyhow::{Context as _, Result, bail};
use playable_config::PlayableConfig;
use playable_scene::{Playable, SceneHostState, ShellEvent};

const FRAME: f32 = 1.0 / 60.0;

struct Args {
    config: Option<String>,
    frames: u32,
    size: (f32, f32),
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        frames: 240,
        size: (720.0, 1280.0),
    };
    for arg in std::env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            args.config = Some(path.to_string());
        } else if let Some(frames) = arg.strip_prefix("--frames=") {
            args.frames = frames.parse().context("--frames expects an integer")?;
        } else if let Some(size) = arg.strip_prefix("--size=") {
            let Some((w, h)) = size.split_once('x') else {
                bail!("--size expects WIDTHxHEIGHT, got {size}");
            };
            args.size = (w.parse()?, h.parse()?);
        } else {
            bail!("unknown argument: {arg}");
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let mut config = PlayableConfig::load_from_file(path)?;
            config.merge_with_env();
            config
        }
        None => PlayableConfig::load(),
    };

    let (width, height) = args.size;
    let mut playable = Playable::with_defaults(config);
    playable.resize(width, height);
    playable.start()?;
    log::info!("session started at {width}x{height}");

    let install_at = (width / 2.0, height / 2.0 - 60.0);
    let go_final_at = (width / 2.0, height / 2.0 + 60.0);
    let mut last_state = playable.scene_state();

    for frame in 0..args.frames {
        match frame {
            30 => tap(&mut playable, install_at),
            45 => tap(&mut playable, go_final_at),
            _ => {}
        }

        playable.tick(FRAME);

        let state = playable.scene_state();
        if state != last_state {
            println!("[{frame:>4}] {}", describe(state));
            last_state = state;
        }
        for event in playable.drain_shell_events() {
            match event {
                ShellEvent::InstallRequested => println!("[{frame:>4}] install requested"),
            }
        }
    }

    let list = playable.display_list();
    println!(
        "final scene: {:?}, overlay showing: {}, {} draw commands",
        playable.current_scene_kind(),
        playable.is_overlay_showing(),
        list.len()
    );
    for text in list.texts() {
        println!("  text: {text}");
    }

    playable.shutdown();
    Ok(())
}

fn tap(playable: &mut Playable, (x, y): (f32, f32)) {
    playable.pointer_down(x, y);
    playable.pointer_up(x, y);
}

fn describe(state: SceneHostState) -> String {
    match state {
        SceneHostState::Idle(Some(kind)) => format!("showing {kind}"),
        SceneHostState::Idle(None) => "empty".to_string(),
        SceneHostState::Transitioning { from: Some(from), to } => format!("fading {from} -> {to}"),
        SceneHostState::Transitioning { from: None, to } => format!("fading in {to}"),
    }
}
