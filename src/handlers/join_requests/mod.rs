//! Join request handlers module
//!
//! Requests to join a configured private group are either approved
//! automatically (public group members) or announced to the group's admins.

use teloxide::types::ChatJoinRequest;
use tracing::{debug, info};
use crate::handlers::callbacks::payload::join_request_keyboard;
use crate::models::GroupPolicy;
use crate::services::{ServiceFactory, TemplateContext};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_group_event};

/// Handle chat join requests
pub async fn handle_chat_join_request(request: ChatJoinRequest, services: ServiceFactory) -> Result<()> {
    let chat_id = request.chat.id;
    let user = &request.from;

    let Some(policy) = services.registry.private_group(chat_id) else {
        debug!(chat_id = chat_id.0, "Join request for an unconfigured chat");
        return Ok(());
    };

    if try_auto_accept(&request, &policy, &services).await {
        return Ok(());
    }

    if !policy.notify_join_request {
        debug!(chat_id = chat_id.0, user_id = user.id.0, "Join request notifications disabled");
        return Ok(());
    }

    let mut context = TemplateContext::new(request.date).with_user(user).with_chat(&request.chat);
    if policy.join_request_message.uses("invite_link") {
        let link = services.invite_links.ensure_link(&policy).await;
        context = context.with_invite_link(link.as_deref());
    }
    let text = policy.join_request_message.render(&context);
    let keyboard = policy
        .notify_join_request_with_approve_button
        .then(|| join_request_keyboard(chat_id, user.id));

    match services.telegram.send_message(chat_id, text, keyboard).await {
        Ok(()) => log_group_event(chat_id.0, "join_request_notified", Some(user.id.0 as i64), None),
        Err(e) => log_api_error("sendMessage", &e, Some("join request notification")),
    }

    Ok(())
}

/// Approve the request when the requester belongs to the linked public
/// group. Returns `true` only if the request was approved.
async fn try_auto_accept(request: &ChatJoinRequest, policy: &GroupPolicy, services: &ServiceFactory) -> bool {
    if !policy.auto_accept_join_request_when_public_group_member {
        return false;
    }
    let Some(public_id) = policy.link.public_id() else {
        return false;
    };

    let chat_id = request.chat.id;
    let user_id = request.from.id;

    let status = match services.telegram.get_member_status(public_id, user_id).await {
        Ok(status) => status,
        Err(e) => {
            log_api_error("getChatMember", &e, Some("auto accept"));
            return false;
        }
    };

    if !status.qualifies_for_auto_accept() {
        debug!(chat_id = chat_id.0, user_id = user_id.0, status = ?status, "Requester is not a public group member");
        return false;
    }

    match services.telegram.approve_join_request(chat_id, user_id).await {
        Ok(()) => {
            info!(chat_id = chat_id.0, user_id = user_id.0, "Join request auto-accepted");
            log_group_event(chat_id.0, "join_request_auto_accepted", Some(user_id.0 as i64), None);
            true
        }
        Err(e) => {
            log_api_error("approveChatJoinRequest", &e, Some("auto accept"));
            false
        }
    }
}
