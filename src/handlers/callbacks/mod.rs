//! Callback query handlers module
//!
//! This module contains handlers for the join request inline buttons

pub mod payload;

use teloxide::types::{CallbackQuery, ChatId, MessageId, UserId};
use tracing::{error, info};
use crate::i18n::messages;
use crate::services::ServiceFactory;
use crate::utils::errors::{GroupWardenError, Result};
use crate::utils::logging::{log_admin_action, log_api_error};
use self::payload::{CallbackCommand, JoinRequestAction};

/// Main callback query dispatcher
pub async fn handle_callback_query(query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let data = query.data.as_deref().unwrap_or_default();
    info!(user_id = query.from.id.0, callback_data = %data, "Processing callback query");

    let command = match data.parse::<CallbackCommand>() {
        Ok(command) => command,
        Err(e) => {
            error!(user_id = query.from.id.0, error = %e, "Malformed callback payload");
            reject_unknown(&services, &query).await;
            return Ok(());
        }
    };

    match command {
        CallbackCommand::JoinRequest { action, chat_id, user_id } => {
            handle_join_request_button(&query, action, chat_id, user_id, &services).await
        }
    }
}

async fn handle_join_request_button(
    query: &CallbackQuery,
    action: JoinRequestAction,
    chat_id: ChatId,
    user_id: UserId,
    services: &ServiceFactory,
) -> Result<()> {
    let message = query.message.as_ref().map(|m| (m.chat().id, m.id()));
    let message_id = match message {
        Some((message_chat, message_id)) if message_chat == chat_id => message_id,
        _ => {
            error!(payload_chat = chat_id.0, message_chat = ?message.map(|(c, _)| c.0), "Callback chat does not match its message");
            reject_unknown(services, query).await;
            return Ok(());
        }
    };

    if services.registry.private_group(chat_id).is_none() {
        error!(chat_id = chat_id.0, "Join request button pressed in an unconfigured chat");
        reject_unknown(services, query).await;
        return Ok(());
    }

    let toast = resolve_join_request(query, action, chat_id, user_id, services).await;

    answer(services, query, toast).await;
    clear_buttons(services, chat_id, message_id).await;
    Ok(())
}

/// Perform the approval or decline if still relevant and allowed; returns the toast to show
async fn resolve_join_request(
    query: &CallbackQuery,
    action: JoinRequestAction,
    chat_id: ChatId,
    user_id: UserId,
    services: &ServiceFactory,
) -> Option<&'static str> {
    let auth = services.auth_middleware();

    match auth.member_status(chat_id, user_id).await {
        Ok(status) if status.is_present() => {
            info!(chat_id = chat_id.0, user_id = user_id.0, "Requester already joined, nothing to do");
            return None;
        }
        Ok(_) => {}
        Err(e) => log_api_error("getChatMember", &e, Some("join request target")),
    }

    let clicker = query.from.id;
    match auth.check_invite_admin(chat_id, clicker).await {
        Ok(_) => {}
        Err(GroupWardenError::PermissionDenied(_)) => return Some(messages::CALLBACK_PERMISSION_DENIED),
        Err(e) => {
            log_api_error("getChatMember", &e, Some("join request clicker"));
            return Some(messages::CALLBACK_FAILED);
        }
    }

    let result = match action {
        JoinRequestAction::Approve => services.telegram.approve_join_request(chat_id, user_id).await,
        JoinRequestAction::Decline => services.telegram.decline_join_request(chat_id, user_id).await,
    };

    match result {
        Ok(()) => {
            log_admin_action(clicker.0 as i64, chat_id.0, action.as_str(), Some(&user_id.0.to_string()));
            Some(match action {
                JoinRequestAction::Approve => messages::CALLBACK_APPROVED,
                JoinRequestAction::Decline => messages::CALLBACK_DECLINED,
            })
        }
        Err(e) => {
            log_api_error("joinRequest", &e, Some(action.as_str()));
            Some(messages::CALLBACK_FAILED)
        }
    }
}

/// Answer "unknown query" and strip the buttons from the query's own message
async fn reject_unknown(services: &ServiceFactory, query: &CallbackQuery) {
    answer(services, query, Some(messages::CALLBACK_UNKNOWN_QUERY)).await;
    if let Some(message) = query.message.as_ref() {
        clear_buttons(services, message.chat().id, message.id()).await;
    }
}

async fn answer(services: &ServiceFactory, query: &CallbackQuery, text: Option<&str>) {
    if let Err(e) = services
        .telegram
        .answer_callback(query, text.map(str::to_owned))
        .await
    {
        log_api_error("answerCallbackQuery", &e, None);
    }
}

async fn clear_buttons(services: &ServiceFactory, chat_id: ChatId, message_id: MessageId) {
    if let Err(e) = services.telegram.clear_reply_markup(chat_id, message_id).await {
        log_api_error("editMessageReplyMarkup", &e, None);
    }
}
