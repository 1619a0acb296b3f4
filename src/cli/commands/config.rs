//! Config command handler

use crate::args::ConfigSubcommand;
use logger::error;
use std::io::{self, Write};
use std::process;
use transcript_analytics::config::{Config, ConfigKey};

/// Dispatch config subcommands
///
/// `config` is the stored configuration, without any CLI overrides applied,
/// so that `set` and `unset` never persist one-off flags.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

fn fail(message: &str) -> ! {
    error!("{message}");
    eprintln!("✗ {message}");
    process::exit(1);
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    let Some(key) = key else {
        println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
        print!("{config}");
        return;
    };

    match config.get(&key) {
        Some(value) => println!("{value}"),
        None => {
            let known: Vec<_> = ConfigKey::ALL.iter().map(|k| k.name()).collect();
            fail(&format!(
                "Unknown config key: '{key}' (expected one of: {})",
                known.join(", ")
            ));
        }
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        fail(&e);
    }
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        fail(&e);
    }
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
    println!("✓ Reset {key} to default");
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            fail(&format!("Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
