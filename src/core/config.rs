//! Configuration for the `transcripts` CLI
//!
//! Settings are stored as TOML in the per-user config directory. Values may
//! reference that directory as `$TRANSCRIPTS`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Compiled-in defaults; release and debug builds keep separate settings
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder for the config directory inside config values
const DIR_VARIABLE: &str = "$TRANSCRIPTS";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty logs to the console
    #[serde(default)]
    pub file: String,
    /// Print per-file progress
    #[serde(default)]
    pub verbose: bool,
}

/// Database locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Academic database holding terms, courses and anonymous records
    #[serde(default)]
    pub main: String,
    /// Identity database mapping anonymous ids to student numbers and names
    #[serde(default)]
    pub ids: String,
}

/// Input and output directories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Default directory of transcript files to ingest
    #[serde(default)]
    pub transcripts_dir: String,
    /// Directory for generated CSV reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override academic database path
    pub main_db: Option<String>,
    /// Override identity database path
    pub ids_db: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

/// A settable configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `logging.level`
    Level,
    /// `logging.file`
    File,
    /// `logging.verbose`
    Verbose,
    /// `database.main`
    MainDb,
    /// `database.ids`
    IdsDb,
    /// `paths.transcripts_dir`
    TranscriptsDir,
    /// `paths.reports_dir`
    ReportsDir,
}

impl ConfigKey {
    /// Every key, in display order
    pub const ALL: [Self; 7] = [
        Self::Level,
        Self::File,
        Self::Verbose,
        Self::MainDb,
        Self::IdsDb,
        Self::TranscriptsDir,
        Self::ReportsDir,
    ];

    /// Canonical key name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::File => "file",
            Self::Verbose => "verbose",
            Self::MainDb => "main_db",
            Self::IdsDb => "ids_db",
            Self::TranscriptsDir => "transcripts_dir",
            Self::ReportsDir => "reports_dir",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    /// Accepts the canonical name, its dashed form, or `section.field`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level" | "logging.level" => Ok(Self::Level),
            "file" | "logging.file" => Ok(Self::File),
            "verbose" | "logging.verbose" => Ok(Self::Verbose),
            "main_db" | "main-db" | "database.main" => Ok(Self::MainDb),
            "ids_db" | "ids-db" | "database.ids" => Ok(Self::IdsDb),
            "transcripts_dir" | "transcripts-dir" | "paths.transcripts_dir" => {
                Ok(Self::TranscriptsDir)
            }
            "reports_dir" | "reports-dir" | "paths.reports_dir" => Ok(Self::ReportsDir),
            _ => Err(format!("Unknown config key: '{s}'")),
        }
    }
}

impl Config {
    /// Directory substituted for `$TRANSCRIPTS`
    ///
    /// - Linux: `~/.config/transcripts`
    /// - macOS: `~/Library/Application Support/transcripts`
    /// - Windows: `%APPDATA%\transcripts`
    #[must_use]
    pub fn get_transcripts_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transcripts")
    }

    /// Path of the user config file (`dconfig.toml` in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_transcripts_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_transcripts_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse a TOML string and expand `$TRANSCRIPTS` in path values
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        for value in [
            &mut config.logging.file,
            &mut config.database.main,
            &mut config.database.ids,
            &mut config.paths.transcripts_dir,
            &mut config.paths.reports_dir,
        ] {
            *value = Self::expand_variables(value);
        }

        Ok(config)
    }

    /// Compiled-in defaults for the current build profile
    ///
    /// # Panics
    /// Panics if the embedded default configuration is not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Fill empty string fields from `defaults`
    ///
    /// Returns `true` if anything changed, so a config written by an older
    /// version picks up newly added settings.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.database.main, &defaults.database.main),
            (&mut self.database.ids, &defaults.database.ids),
            (&mut self.paths.transcripts_dir, &defaults.paths.transcripts_dir),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
        ];

        let mut changed = false;
        for (value, default) in pairs {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(main_db) = &overrides.main_db {
            self.database.main.clone_from(main_db);
        }
        if let Some(ids_db) = &overrides.ids_db {
            self.database.ids.clone_from(ids_db);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Load the user config, creating it from defaults on first run
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match Self::load_from(&config_file) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(_) => defaults,
        }
    }

    /// Read a config file without merging defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Save to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save to an explicit path, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get a value by key name
    ///
    /// Returns `None` for an unknown key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let key = key.parse::<ConfigKey>().ok()?;
        Some(match key {
            ConfigKey::Level => self.logging.level.clone(),
            ConfigKey::File => self.logging.file.clone(),
            ConfigKey::Verbose => self.logging.verbose.to_string(),
            ConfigKey::MainDb => self.database.main.clone(),
            ConfigKey::IdsDb => self.database.ids.clone(),
            ConfigKey::TranscriptsDir => self.paths.transcripts_dir.clone(),
            ConfigKey::ReportsDir => self.paths.reports_dir.clone(),
        })
    }

    /// Set a value by key name; call [`save`](Self::save) to persist
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.parse::<ConfigKey>()? {
            ConfigKey::Level => {
                value
                    .parse::<logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_string();
            }
            ConfigKey::File => self.logging.file = value.to_string(),
            ConfigKey::Verbose => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            ConfigKey::MainDb => self.database.main = value.to_string(),
            ConfigKey::IdsDb => self.database.ids = value.to_string(),
            ConfigKey::TranscriptsDir => self.paths.transcripts_dir = value.to_string(),
            ConfigKey::ReportsDir => self.paths.reports_dir = value.to_string(),
        }
        Ok(())
    }

    /// Reset one value to its default; call [`save`](Self::save) to persist
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.parse::<ConfigKey>()? {
            ConfigKey::Level => self.logging.level.clone_from(&defaults.logging.level),
            ConfigKey::File => self.logging.file.clone_from(&defaults.logging.file),
            ConfigKey::Verbose => self.logging.verbose = defaults.logging.verbose,
            ConfigKey::MainDb => self.database.main.clone_from(&defaults.database.main),
            ConfigKey::IdsDb => self.database.ids.clone_from(&defaults.database.ids),
            ConfigKey::TranscriptsDir => self
                .paths
                .transcripts_dir
                .clone_from(&defaults.paths.transcripts_dir),
            ConfigKey::ReportsDir => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
        }
        Ok(())
    }

    /// Delete the user config file; the next [`load`](Self::load) recreates it
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[database]")?;
        writeln!(f, "  main = \"{}\"", self.database.main)?;
        writeln!(f, "  ids = \"{}\"", self.database.ids)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  transcripts_dir = \"{}\"", self.paths.transcripts_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
