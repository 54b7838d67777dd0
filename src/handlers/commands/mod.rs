//! Command handlers module
//!
//! This module contains handlers for the private group commands
//! `/revokeCurrentLink`, `/su` and `/exit`.

pub mod admin_transfer;
pub mod revoke;

use teloxide::types::{ChatId, Message};
use teloxide::utils::command::{BotCommands, ParseError};
use tracing::debug;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging::log_api_error;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "GroupWarden commands:")]
pub enum Command {
    #[command(rename = "revokeCurrentLink", description = "撤銷目前的私人群組邀請連結")]
    RevokeCurrentLink,
    #[command(description = "取得本群管理員權限（可附加頭銜）", parse_with = parse_optional_title)]
    Su(String),
    #[command(description = "退出本群管理員身分")]
    Exit,
}

/// `/su` takes an optional free-form title
fn parse_optional_title(input: String) -> std::result::Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

/// Main command dispatcher
///
/// Commands only apply inside configured private groups and need a sender.
pub async fn handle_command(msg: Message, cmd: Command, services: ServiceFactory) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(policy) = services.registry.private_group(chat_id) else {
        debug!(chat_id = chat_id.0, command = ?cmd, "Command outside a configured private group");
        return Ok(());
    };
    let Some(caller) = msg.from.as_ref() else {
        debug!(chat_id = chat_id.0, command = ?cmd, "Command without a sender");
        return Ok(());
    };

    match cmd {
        Command::RevokeCurrentLink => revoke::handle_revoke_current_link(chat_id, caller, &services).await,
        Command::Su(title) => admin_transfer::handle_su(chat_id, caller, &policy, &title, &services).await,
        Command::Exit => admin_transfer::handle_exit(chat_id, caller, &policy, &services).await,
    }
}

/// Send a fixed reply to the chat, logging failures
pub(crate) async fn reply(services: &ServiceFactory, chat_id: ChatId, text: impl Into<String>) {
    if let Err(e) = services.telegram.send_message(chat_id, text.into(), None).await {
        log_api_error("sendMessage", &e, Some("command reply"));
    }
}
