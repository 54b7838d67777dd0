//! Message handlers module
//!
//! Handles new member events: welcomes users who joined a configured group
//! by themselves, attaching the private group's invite link in public groups.

use chrono::{DateTime, Utc};
use teloxide::types::{Chat, Message, User};
use tracing::{debug, info};
use crate::models::GroupPolicy;
use crate::services::{ServiceFactory, TemplateContext};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_group_event};

/// The joining user, when exactly one member joined and it was the sender
pub fn self_joined_member(msg: &Message) -> Option<&User> {
    let members = msg.new_chat_members()?;
    let sender = msg.from.as_ref()?;

    match members {
        [member] if member.id == sender.id => Some(member),
        _ => None,
    }
}

/// Handle new chat member events
pub async fn handle_new_chat_member(msg: Message, services: ServiceFactory) -> Result<()> {
    let chat_id = msg.chat.id;

    let Some(member) = self_joined_member(&msg) else {
        info!(
            chat_id = chat_id.0,
            inviter = ?msg.from.as_ref().map(|u| u.id.0),
            count = msg.new_chat_members().map(|m| m.len()).unwrap_or(0),
            "Members added by someone else, no welcome sent"
        );
        return Ok(());
    };

    debug!(user_id = member.id.0, chat_id = chat_id.0, "New member joined chat");

    if let Some(policy) = services.registry.public_group(chat_id) {
        if policy.welcome_on_join_public_group {
            welcome_public(&services, &policy, &msg.chat, member, msg.date).await;
        } else {
            debug!(chat_id = chat_id.0, "Public group welcome disabled");
        }
    } else if let Some(policy) = services.registry.private_group(chat_id) {
        if policy.welcome_on_join_private_group {
            let context = TemplateContext::new(msg.date).with_user(member).with_chat(&msg.chat);
            let text = policy.welcome_private_group_message.render(&context);
            send_welcome(&services, &msg.chat, member, text).await;
        } else {
            debug!(chat_id = chat_id.0, "Private group welcome disabled");
        }
    } else {
        debug!(chat_id = chat_id.0, "Chat is not configured, ignoring new member");
    }

    Ok(())
}

async fn welcome_public(
    services: &ServiceFactory,
    policy: &GroupPolicy,
    chat: &Chat,
    member: &User,
    date: DateTime<Utc>,
) {
    let mut context = TemplateContext::new(date).with_user(member).with_chat(chat);

    if let Some(private_id) = policy.link.private_id() {
        let link = services.invite_links.ensure_link(policy).await;
        context = context.with_invite_link(link.as_deref());

        let template = &policy.welcome_public_group_message;
        if template.placeholders().iter().any(|name| name.starts_with("private_chat_")) {
            match services.telegram.get_chat_info(private_id).await {
                Ok(info) => context = context.with_private_chat(&info),
                Err(e) => log_api_error("getChat", &e, Some("public welcome")),
            }
        }
    }

    let text = policy.welcome_public_group_message.render(&context);
    send_welcome(services, chat, member, text).await;
}

async fn send_welcome(services: &ServiceFactory, chat: &Chat, member: &User, text: String) {
    match services.telegram.send_message(chat.id, text, None).await {
        Ok(()) => log_group_event(chat.id.0, "welcome_sent", Some(member.id.0 as i64), None),
        Err(e) => log_api_error("sendMessage", &e, Some("welcome")),
    }
}
