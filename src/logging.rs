use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{ReconError, Result};

/// Where log lines go for one run: an interactive console, a file, or both.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Optional log file; written without ANSI colour codes.
    pub file: Option<PathBuf>,
    /// Emit coloured lines to the console.
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            console: true,
        }
    }
}

/// Installs the global tracing subscriber described by `config`.
///
/// Every line carries a timestamp, the originating file and line, the
/// severity, and the message. The default level is `debug`, overridable
/// with `RUST_LOG`. Fails if a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
    });

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| ReconError::Logging(error.to_string()))
}
