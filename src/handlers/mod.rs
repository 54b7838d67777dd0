//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for private group commands
//! - Callback handlers for the join request buttons
//! - Join request handlers
//! - Message handlers for new member events

pub mod commands;
pub mod callbacks;
pub mod join_requests;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use callbacks::handle_callback_query;
pub use join_requests::handle_chat_join_request;
pub use messages::handle_new_chat_member;
