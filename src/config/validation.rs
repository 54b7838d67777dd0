//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured. Per-group checks
//! that need the resolved policy live in the policy registry.

use crate::utils::errors::{GroupWardenError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_logging_config(&settings.logging)?;
    validate_storage_config(&settings.storage)?;
    validate_group_entries(&settings.groups)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(GroupWardenError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GroupWardenError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GroupWardenError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(path) = &config.file_path {
        if path.trim().is_empty() {
            return Err(GroupWardenError::Config(
                "Log file path must not be empty when set".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate invite link storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.path.trim().is_empty() {
        return Err(GroupWardenError::Config(
            "Storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate the group list
fn validate_group_entries(groups: &[super::GroupEntry]) -> Result<()> {
    if groups.is_empty() {
        return Err(GroupWardenError::Config(
            "At least one group entry must be configured".to_string()
        ));
    }

    for (index, entry) in groups.iter().enumerate() {
        if entry.public_group_id.is_none() && entry.private_group_id.is_none() {
            return Err(GroupWardenError::Config(
                format!("Group entry #{} declares neither public_group_id nor private_group_id", index)
            ));
        }
    }

    Ok(())
}
