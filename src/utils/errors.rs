//! Error handling for GroupWarden
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for GroupWarden application
#[derive(Error, Debug)]
pub enum GroupWardenError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for GroupWarden operations
pub type Result<T> = std::result::Result<T, GroupWardenError>;

impl GroupWardenError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GroupWardenError::Telegram(_) => true,
            GroupWardenError::Config(_) => false,
            GroupWardenError::ConfigLoad(_) => false,
            GroupWardenError::PermissionDenied(_) => false,
            GroupWardenError::Serialization(_) => false,
            GroupWardenError::Io(_) => true,
            GroupWardenError::InvalidInput(_) => false,
            GroupWardenError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GroupWardenError::Config(_) => ErrorSeverity::Critical,
            GroupWardenError::ConfigLoad(_) => ErrorSeverity::Critical,
            GroupWardenError::PermissionDenied(_) => ErrorSeverity::Warning,
            GroupWardenError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
