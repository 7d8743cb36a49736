//! Logging initialization
//!
//! Code throughout the workspace logs through the `log` facade. At startup the
//! `log` records are bridged into a `tracing-subscriber` pipeline (console, plus
//! an optional file copy), filtered by `RUST_LOG`.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::core::error::{AppError, AppResult};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,teloxide=warn,mongodb=warn";

/// Initialize logger for console and (optionally) file output
///
/// # Arguments
/// * `log_file_path` - Optional path of a log file; created or truncated
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(AppError)` - Log file could not be created or a logger is already installed
pub fn init_logger(log_file_path: Option<&str>) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match log_file_path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::Init(format!("Failed to create log file {}: {}", path, e)))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Init(format!("Failed to initialize logger: {}", e)))?;
    tracing_log::LogTracer::init().map_err(|e| AppError::Init(format!("Failed to bridge log records: {}", e)))?;

    Ok(())
}
