/// Example program to print the loaded configuration
///
/// Run with: cargo run -p playable-config --example print_config

fn main() {
    let config = playable_config::PlayableConfig::load();

    println!("=== Playable Configuration ===\n");

    println!("Stage Settings:");
    println!("  Initial Scene: {}", config.stage.initial_scene);
    println!("  Viewport: {}x{}", config.stage.width, config.stage.height);
    println!();

    println!("Scene Settings:");
    println!("  Fade Step: {}", config.scene.fade_step);
    println!();

    println!("Popup Settings:");
    println!("  Show Duration: {}s", config.popup.show_duration);
    println!("  Hide Duration: {}s", config.popup.hide_duration);
    println!(
        "  Overshoot: {} at {}",
        config.popup.overshoot, config.popup.overshoot_split
    );
    println!();

    println!("Sound Settings:");
    println!("  Muted: {}", config.sound.muted);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
