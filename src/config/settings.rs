//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::Deserialize;
use crate::models::policy::InviteLinkExpiry;
use crate::utils::errors::Result;

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "GROUPWARDEN_CONFIG";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub defaults: GroupSettings,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Invite link persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

/// Per-group behaviour switches. Every field is optional so that group
/// entries can override only what differs from `[defaults]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupSettings {
    pub welcome_on_join_public_group: Option<bool>,
    pub welcome_on_join_private_group: Option<bool>,
    pub notify_join_request: Option<bool>,
    pub notify_join_request_with_approve_button: Option<bool>,
    pub auto_accept_join_request_when_public_group_member: Option<bool>,
    pub allow_admin_transfer: Option<bool>,
    pub admin_custom_title: Option<String>,
    pub welcome_public_group_message: Option<String>,
    pub welcome_private_group_message: Option<String>,
    pub join_request_message: Option<String>,
    pub invite_link_expired_time: Option<InviteLinkExpiry>,
}

/// One `[[groups]]` entry pairing a public and/or private chat
#[derive(Debug, Clone, Deserialize)]
pub struct GroupEntry {
    pub public_group_id: Option<i64>,
    pub private_group_id: Option<i64>,
    #[serde(flatten)]
    pub settings: GroupSettings,
}

impl GroupSettings {
    /// Fill every unset field from `fallback`
    pub fn or(&self, fallback: &GroupSettings) -> GroupSettings {
        GroupSettings {
            welcome_on_join_public_group: self.welcome_on_join_public_group.or(fallback.welcome_on_join_public_group),
            welcome_on_join_private_group: self.welcome_on_join_private_group.or(fallback.welcome_on_join_private_group),
            notify_join_request: self.notify_join_request.or(fallback.notify_join_request),
            notify_join_request_with_approve_button: self
                .notify_join_request_with_approve_button
                .or(fallback.notify_join_request_with_approve_button),
            auto_accept_join_request_when_public_group_member: self
                .auto_accept_join_request_when_public_group_member
                .or(fallback.auto_accept_join_request_when_public_group_member),
            allow_admin_transfer: self.allow_admin_transfer.or(fallback.allow_admin_transfer),
            admin_custom_title: self.admin_custom_title.clone().or_else(|| fallback.admin_custom_title.clone()),
            welcome_public_group_message: self
                .welcome_public_group_message
                .clone()
                .or_else(|| fallback.welcome_public_group_message.clone()),
            welcome_private_group_message: self
                .welcome_private_group_message
                .clone()
                .or_else(|| fallback.welcome_private_group_message.clone()),
            join_request_message: self.join_request_message.clone().or_else(|| fallback.join_request_message.clone()),
            invite_link_expired_time: self.invite_link_expired_time.or(fallback.invite_link_expired_time),
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        let file = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        let settings = Self::builder()?
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix("GROUPWARDEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Load settings from a single TOML file, without environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::new(path, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("storage.path", "data/invite_links.json")?;
        Ok(builder)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
            storage: StorageConfig {
                path: "data/invite_links.json".to_string(),
            },
            defaults: GroupSettings::default(),
            groups: vec![],
        }
    }
}
