//! Runtime settings read from `HEPASCOPE_*` environment variables.
//!
//! Everything has a default; only malformed values are errors.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::application::DEFAULT_ANALYSIS_DELAY;

const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(4);
const DEFAULT_LOG_FILE: &str = "hepascope.log";

/// Errors raised while reading settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: expected a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: expected one of auto, file, stdout, got {value:?}")]
    InvalidLogMode { var: &'static str, value: String },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal (the TUI owns the screen), stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

impl FromStr for LogMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            _ => Err(()),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Simulated analysis time.
    pub analysis_delay: Duration,
    /// How long a notice stays on screen.
    pub notice_ttl: Duration,
    /// Fixed seed for the random predictor; entropy when `None`.
    pub rng_seed: Option<u64>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
            notice_ttl: DEFAULT_NOTICE_TTL,
            rng_seed: None,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is set but malformed.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Read settings through an arbitrary lookup (used by tests).
    ///
    /// # Errors
    /// Returns error if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(ms) = parse_number(&lookup, "HEPASCOPE_ANALYSIS_DELAY_MS")? {
            settings.analysis_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_number(&lookup, "HEPASCOPE_NOTICE_TTL_MS")? {
            settings.notice_ttl = Duration::from_millis(ms);
        }
        settings.rng_seed = parse_number(&lookup, "HEPASCOPE_RNG_SEED")?;

        if let Some(value) = lookup("HEPASCOPE_LOG_MODE") {
            settings.log_mode = value.parse().map_err(|()| ConfigError::InvalidLogMode {
                var: "HEPASCOPE_LOG_MODE",
                value,
            })?;
        }
        if let Some(path) = lookup("HEPASCOPE_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            settings.log_file = PathBuf::from(path);
        }

        Ok(settings)
    }
}

fn parse_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
