//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program-defined verbosity levels for diagnostic logs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Run start/finish and warnings (default)
    #[default]
    Normal,
    /// Every filesystem action
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one flattening run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Explicit repository root; None means "derive from the executable's location"
    pub repository_root: Option<PathBuf>,
    /// Diagnostic verbosity
    pub log_level: LogLevel,
    /// If true, report planned moves but do not modify the filesystem
    pub dry_run: bool,
    /// Emit diagnostic logs as JSON
    pub json: bool,
}

impl Config {
    /// Construct a Config pinned to `root`; other fields use defaults.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            repository_root: Some(root.into()),
            ..Default::default()
        }
    }
}
