//! CLI argument definitions for `transcripts`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use transcript_analytics::config::ConfigOverrides;
use transcript_analytics::core::report::ReportKind;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

/// Report selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportArg {
    /// Lowest grade per first-year course with the outcome label
    FirstYear,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::FirstYear => Self::FirstYear,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `main_db`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Reset one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Parse transcripts and print what was found.
    ///
    /// Nothing is written to the databases.
    Parse {
        /// Transcript files to parse
        #[arg(value_name = "FILES", num_args = 1.., required = true)]
        files: Vec<PathBuf>,

        /// Print each full record as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },
    /// Parse transcripts and store them in the databases.
    Ingest {
        /// A transcript file or a directory of them (defaults to config `transcripts_dir`)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Generate a CSV report from the stored records.
    Report {
        /// Report to generate
        #[arg(value_enum, value_name = "REPORT")]
        kind: ReportArg,

        /// Output file (defaults to a file in config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "transcripts",
    about = "Parse academic transcripts, classify outcomes and export reports",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the academic database path for this run
    #[arg(long = "main-db", value_name = "PATH")]
    pub main_db: Option<PathBuf>,

    /// Override the identity database path for this run
    #[arg(long = "ids-db", value_name = "PATH")]
    pub ids_db: Option<PathBuf>,

    /// Override the reports directory for this run
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.log_level.map(|lvl| Level::from(lvl).to_string()),
            file: self.log_file.as_ref().map(path_string),
            verbose: self.verbose.then_some(true),
            main_db: self.main_db.as_ref().map(path_string),
            ids_db: self.ids_db.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("transcripts").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.main_db.is_none());
        assert!(overrides.ids_db.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--log-level",
            "debug",
            "-v",
            "--main-db",
            "/tmp/main.sqlite",
            "--ids-db",
            "/tmp/ids.sqlite",
            "--reports-dir",
            "/tmp/reports",
            "report",
            "first-year",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("debug"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.main_db.as_deref(), Some("/tmp/main.sqlite"));
        assert_eq!(overrides.ids_db.as_deref(), Some("/tmp/ids.sqlite"));
        assert_eq!(overrides.reports_dir.as_deref(), Some("/tmp/reports"));
        assert!(matches!(
            cli.command,
            Command::Report {
                kind: ReportArg::FirstYear,
                output: None
            }
        ));
    }

    #[test]
    fn test_parse_requires_files() {
        assert!(Cli::try_parse_from(["transcripts", "parse"]).is_err());

        let cli = parse(&["parse", "a.txt", "b.txt", "--json"]);
        match cli.command {
            Command::Parse { files, json } => {
                assert_eq!(files.len(), 2);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ingest_path_is_optional() {
        assert!(matches!(
            parse(&["ingest"]).command,
            Command::Ingest { path: None }
        ));
    }
}
