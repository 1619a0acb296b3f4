//! Command-line interface entry point for `transcripts`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use logger::{enable_debug, enable_verbose, error, info, init_file_logging, set_level, Level};
use std::path::PathBuf;
use std::process;
use transcript_analytics::config::Config;

fn main() {
    let args = Cli::parse();

    // The stored config stays untouched for `config` edits; overrides apply to this run only
    let stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; unknown values fall back to warn
    let mut level = args
        .log_level
        .map(Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    if !config.logging.file.is_empty() {
        let log_path = PathBuf::from(&config.logging.file);
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            let mut stored = stored;
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Parse { files, json } => {
            if commands::parse::run(&files, json) > 0 {
                process::exit(1);
            }
        }
        Command::Ingest { path } => {
            let input = path.unwrap_or_else(|| PathBuf::from(&config.paths.transcripts_dir));
            match commands::ingest::run(&input, &config) {
                Ok(summary) if summary.failed > 0 => process::exit(1),
                Ok(_) => {}
                Err(e) => exit_with(&e),
            }
        }
        Command::Report { kind, output } => {
            match commands::report::run(kind.into(), output.as_deref(), &config) {
                Ok(path) => println!("✓ Report generated: {}", path.display()),
                Err(e) => exit_with(&e),
            }
        }
    }
}

fn exit_with(message: &str) -> ! {
    error!("{message}");
    eprintln!("✗ {message}");
    process::exit(1);
}
