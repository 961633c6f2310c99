//! Observability: structured logging and the store event bus.
//!
//! Metrics are emitted through the `metrics` facade; installing a recorder is
//! left to the host process.

mod event_bus;
mod logging;

pub use event_bus::{DEFAULT_EVENT_BUS_CAPACITY, EventBus, EventFilter, EventSubscription};
pub use logging::{LOG_FILTER_ENV, LogFormat, LoggingConfig};

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt};

/// Output layer installed under the filter.
type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber.
///
/// Events go to stderr, or are appended to `config.file` when set.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init(config: LoggingConfig) -> Result<()> {
    let LoggingConfig {
        filter,
        format,
        file,
    } = config;
    let log_file = file.as_deref().map(append_to).transpose()?;

    tracing_subscriber::registry()
        .with(output_layer(format, log_file))
        .with(filter)
        .try_init()
        .map_err(|e| Error::OperationFailed {
            operation: "logging_init".to_string(),
            cause: e.to_string(),
        })
}

fn output_layer(format: LogFormat, log_file: Option<File>) -> OutputLayer {
    match (format, log_file) {
        (LogFormat::Json, Some(file)) => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(Mutex::new(file))
            .boxed(),
        (LogFormat::Json, None) => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(io::stderr)
            .boxed(),
        (LogFormat::Pretty, Some(file)) => fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .boxed(),
        (LogFormat::Pretty, None) => fmt::layer().pretty().with_writer(io::stderr).boxed(),
    }
}

/// Opens `path` for appending, creating missing parent directories.
fn append_to(path: &Path) -> Result<File> {
    let open_failed = |e: io::Error| Error::OperationFailed {
        operation: "open_log_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(open_failed)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_failed)
}
