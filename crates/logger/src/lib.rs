//! Level-gated logger for the transcripts tooling.
//!
//! - `log-info` enables `info!` output (enabled by default).
//! - `log-debug` enables `debug!` output and a runtime debug switch.
//! - `verbose` enables `verbose!`, an untagged progress printer.
//! - `file-logging` lets tagged messages be redirected to a log file.
//! - `warn!` and `error!` are always active.
//!
//! Tagged messages go to stdout (`info`, `debug`) or stderr (`warn`, `error`)
//! unless a log file has been opened, in which case they go to the file only.
//! Verbose output never reaches the log file.

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::LazyLock;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

/// Logging levels, ordered from most to least severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime flag).
    Debug = 4,
}

impl Level {
    /// Tag written in front of every message at this level.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn uses_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("Unknown log level: '{other}'")),
        }
    }
}

/// Level used before anything calls [`set_level`].
const fn default_level() -> Level {
    if cfg!(feature = "log-debug") {
        Level::Debug
    } else if cfg!(feature = "log-info") {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Process-wide logger switches.
struct LoggerState {
    level: AtomicU8,
    debug: AtomicBool,
    verbose: AtomicBool,
    #[cfg(feature = "file-logging")]
    file: Mutex<Option<File>>,
}

static STATE: LazyLock<LoggerState> = LazyLock::new(|| LoggerState {
    level: AtomicU8::new(default_level() as u8),
    debug: AtomicBool::new(true),
    verbose: AtomicBool::new(false),
    #[cfg(feature = "file-logging")]
    file: Mutex::new(None),
});

/// Set the global log level.
pub fn set_level(level: Level) {
    STATE.level.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(STATE.level.load(Ordering::SeqCst))
}

/// Parse and set level from a string (case-insensitive). Returns true on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

/// Enable debug logging at runtime (no effect without `log-debug`).
pub fn enable_debug() {
    STATE.debug.store(true, Ordering::SeqCst);
}

/// Disable debug logging at runtime.
pub fn disable_debug() {
    STATE.debug.store(false, Ordering::SeqCst);
}

/// Returns whether debug logging is enabled (always false without `log-debug`).
#[must_use]
pub fn is_debug_enabled() -> bool {
    cfg!(feature = "log-debug") && STATE.debug.load(Ordering::SeqCst)
}

/// Enable verbose output at runtime (no effect without `verbose`).
pub fn enable_verbose() {
    STATE.verbose.store(true, Ordering::SeqCst);
}

/// Disable verbose output at runtime.
pub fn disable_verbose() {
    STATE.verbose.store(false, Ordering::SeqCst);
}

/// Returns whether verbose output is enabled (always false without `verbose`).
#[must_use]
pub fn is_verbose_enabled() -> bool {
    cfg!(feature = "verbose") && STATE.verbose.load(Ordering::SeqCst)
}

/// Open `path` in append mode and route tagged messages to it.
/// Returns true on success, false on failure.
#[cfg(feature = "file-logging")]
#[must_use]
pub fn init_file_logging(path: &Path) -> bool {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    match STATE.file.lock() {
        Ok(mut slot) => {
            *slot = Some(file);
            true
        }
        Err(_) => false,
    }
}

/// File logging is compiled out; always returns false.
#[cfg(not(feature = "file-logging"))]
#[must_use]
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Stop writing to the log file and fall back to the console.
pub fn close_file_logging() {
    #[cfg(feature = "file-logging")]
    if let Ok(mut slot) = STATE.file.lock() {
        if let Some(mut file) = slot.take() {
            let _ = file.flush();
        }
    }
}

/// Write `line` to the log file if one is open. Returns true if it was written.
#[cfg(feature = "file-logging")]
fn write_to_file(line: &str) -> bool {
    let Ok(mut slot) = STATE.file.lock() else {
        return false;
    };
    slot.as_mut().is_some_and(|file| {
        let _ = writeln!(file, "{line}");
        let _ = file.flush();
        true
    })
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_line: &str) -> bool {
    false
}

/// Decide whether a message at `level` should be emitted.
fn should_log(level: Level) -> bool {
    let compiled_in = match level {
        Level::Info => cfg!(feature = "log-info"),
        Level::Debug => is_debug_enabled(),
        Level::Error | Level::Warn => true,
    };
    compiled_in && level <= self::level()
}

/// Dispatch used by the logging macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_to_file(&line) {
        return;
    }
    if level.uses_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Logs an error-level message (always enabled). Emits to stderr.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Error, format_args!($($arg)*)) };
}

/// Logs a warning-level message (always enabled). Emits to stderr.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Warn, format_args!($($arg)*)) };
}

/// Logs an info-level message (requires `log-info`).
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Info, format_args!($($arg)*)) };
}

/// Logs a debug-level message (requires `log-debug` and runtime enablement).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Debug, format_args!($($arg)*)) };
}

/// Prints an untagged progress line when verbose output is enabled.
/// Never written to the log file.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}
