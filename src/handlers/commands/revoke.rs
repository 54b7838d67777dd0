//! `/revokeCurrentLink` command handler

use teloxide::types::{ChatId, User};
use teloxide::utils::html;
use crate::i18n::messages;
use crate::services::{Invalidation, ServiceFactory};
use crate::utils::errors::{GroupWardenError, Result};
use crate::utils::logging::{log_admin_action, log_api_error};
use super::reply;

/// Handle /revokeCurrentLink: force-invalidate the group's invite link
pub async fn handle_revoke_current_link(chat_id: ChatId, caller: &User, services: &ServiceFactory) -> Result<()> {
    match services.auth_middleware().check_invite_admin(chat_id, caller.id).await {
        Ok(_) => {}
        Err(GroupWardenError::PermissionDenied(_)) => {
            reply(services, chat_id, messages::ADMIN_ONLY).await;
            return Ok(());
        }
        Err(e) => {
            log_api_error("getChatMember", &e, Some("revokeCurrentLink"));
            reply(services, chat_id, messages::STATUS_UNAVAILABLE).await;
            return Ok(());
        }
    }

    let outcome = services.invite_links.invalidate(chat_id, true).await;
    log_admin_action(
        caller.id.0 as i64,
        chat_id.0,
        "revoke_current_link",
        outcome.previous_link.as_deref(),
    );

    reply(services, chat_id, revoke_reply(&outcome)).await;
    Ok(())
}

/// One of the three fixed outcomes
pub fn revoke_reply(outcome: &Invalidation) -> String {
    match (&outcome.previous_link, outcome.revoked) {
        (None, _) => messages::REVOKE_NOTHING.to_string(),
        (Some(link), true) => format!("{}{}", messages::REVOKE_SUCCESS, html::escape(link)),
        (Some(link), false) => format!("{}{}", messages::REVOKE_FAILED, html::escape(link)),
    }
}
