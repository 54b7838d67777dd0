//! GroupWarden Telegram Bot
//!
//! A Telegram bot that welcomes new members, gates a private group behind
//! membership of a public group through join requests and single-use invite
//! links, and lets public group admins lend themselves admin rights in the
//! linked private group.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod i18n;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GroupWardenError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::InviteLinkStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
