use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::LogConfig;
use crate::error::{Result, ZeroBugError};

const DEFAULT_FILTER: &str = "zerobug_notifier=info";
const LOG_FILE_PREFIX: &str = "zerobug_logs";

pub struct FileLogger {
    log_directory: PathBuf,
    max_files: usize,
    rotation: Rotation,
}

impl FileLogger {
    pub fn new(log_directory: PathBuf) -> Self {
        Self {
            log_directory,
            max_files: 5,
            rotation: Rotation::DAILY,
        }
    }

    pub fn from_config(config: &LogConfig) -> Self {
        Self::new(config.directory.clone()).with_max_files(config.max_files)
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn setup_file_logging(&self) -> Result<(NonBlocking, WorkerGuard)> {
        std::fs::create_dir_all(&self.log_directory)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(LOG_FILE_PREFIX)
            .max_log_files(self.max_files)
            .build(&self.log_directory)
            .map_err(|e| ZeroBugError::ConfigError(format!("Failed to open log file: {}", e)))?;

        Ok(tracing_appender::non_blocking(file_appender))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Console logging, plus rolling file logs when a [`FileLogger`] is given.
///
/// The returned guard must be held for as long as file logs should flush.
pub fn setup_logging(file_logger: Option<&FileLogger>) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_logger {
        Some(file_logger) => {
            let (writer, guard) = file_logger.setup_file_logging()?;
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false) // Disable ANSI colors for file logs
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Ignore "already initialized" so tests and embedders can call this twice
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true)) // Console output
        .with(file_layer)
        .try_init();

    Ok(guard)
}
