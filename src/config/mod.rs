//! Configuration management.

use crate::observability::DEFAULT_EVENT_BUS_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of alerts requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Main configuration for catalog state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateConfig {
    /// Page size requested by paginated list fetches.
    pub page_size: u32,
    /// Capacity of each store's event bus.
    pub event_bus_capacity: usize,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level or filter directives (e.g. `info`, `catalog_state=debug`).
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Optional file to append logs to.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Page size.
    pub page_size: Option<u32>,
    /// Event bus capacity.
    pub event_bus_capacity: Option<usize>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
            logging: LoggingSettings::default(),
        }
    }
}

impl StateConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it sets a
    /// zero page size.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for [`ConfigFile`] or
    /// sets a zero page size.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/catalog-state/` on macOS)
    /// 2. XDG config dir (`~/.config/catalog-state/` for Unix compatibility)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs
                .config_dir()
                .join("catalog-state")
                .join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("catalog-state")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `StateConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(page_size) = file.page_size {
            if page_size == 0 {
                return Err(crate::Error::InvalidInput(
                    "page_size must be greater than zero".to_string(),
                ));
            }
            config.page_size = page_size;
        }
        if let Some(capacity) = file.event_bus_capacity {
            config.event_bus_capacity = capacity.max(1);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }
}
