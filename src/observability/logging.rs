//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_FILTER_ENV: &str = "CATALOG_STATE_LOG";

const DEFAULT_LEVEL: &str = "info";
const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, defaulting to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Optional file to append to instead of stderr.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolves logging configuration from file settings and CLI flags.
    ///
    /// Precedence for the filter: `CATALOG_STATE_LOG`, then `--verbose`, then
    /// the configured level, then `info`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let configured_level = settings.and_then(|s| s.level.as_deref());
        let level = if verbose {
            VERBOSE_LEVEL
        } else {
            configured_level.unwrap_or(DEFAULT_LEVEL)
        };

        let filter = std::env::var(LOG_FILTER_ENV)
            .ok()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| {
                EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
            });

        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();

        Self {
            filter,
            format,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: EnvFilter::new(DEFAULT_LEVEL),
            format: LogFormat::default(),
            file: None,
        }
    }
}
