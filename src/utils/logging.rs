//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GroupWarden application.

use std::path::Path;
use tracing::{info, warn, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{GroupWardenError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the log file on drop and must be held for the
/// lifetime of the process. It is `None` when no log file is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(file_path) => {
            let path = Path::new(file_path);
            let file_name = path.file_name().ok_or_else(|| {
                GroupWardenError::Config(format!("Invalid log file path: {}", file_path))
            })?;
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            std::fs::create_dir_all(directory)?;

            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| GroupWardenError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!(level = %config.level, file = ?config.file_path, "Logging initialized");
    Ok(guard)
}

/// Log group events
pub fn log_group_event(group_id: i64, event: &str, user_id: Option<i64>, details: Option<&str>) {
    info!(
        group_id = group_id,
        event = event,
        user_id = user_id,
        details = details,
        "Group event occurred"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, group_id: i64, action: &str, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        group_id = group_id,
        action = action,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &GroupWardenError, context: Option<&str>) {
    error!(
        api = api,
        error = %error,
        recoverable = error.is_recoverable(),
        context = context,
        "API error occurred"
    );
}
