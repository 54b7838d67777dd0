//! `/su` and `/exit` command handlers
//!
//! Administrators of the linked public group may give themselves a
//! constrained admin role in the private group and drop it again.

use teloxide::types::{ChatId, User};
use tracing::{info, warn};
use crate::i18n::messages;
use crate::models::{AdminRights, GroupPolicy, MemberStatus};
use crate::services::ServiceFactory;
use crate::utils::errors::{GroupWardenError, Result};
use crate::utils::logging::{log_admin_action, log_api_error};
use super::reply;

/// Why `/su` must not promote a member with this private group status
pub fn su_refusal(status: &MemberStatus) -> Option<&'static str> {
    match status {
        MemberStatus::Owner => Some(messages::SU_CREATOR),
        MemberStatus::Administrator { .. } => Some(messages::SU_ALREADY_ADMIN),
        MemberStatus::Left | MemberStatus::Banned => Some(messages::SU_NOT_MEMBER),
        MemberStatus::Member | MemberStatus::Restricted { .. } => None,
    }
}

/// Why `/exit` must not demote a member with this private group status
pub fn exit_refusal(status: &MemberStatus) -> Option<&'static str> {
    match status {
        MemberStatus::Owner => Some(messages::EXIT_CREATOR),
        MemberStatus::Administrator { can_be_edited: false, .. } => Some(messages::EXIT_NOT_EDITABLE),
        MemberStatus::Administrator { can_be_edited: true, .. } => None,
        _ => Some(messages::EXIT_NOT_ADMIN),
    }
}

/// Handle /su
pub async fn handle_su(
    chat_id: ChatId,
    caller: &User,
    policy: &GroupPolicy,
    title: &str,
    services: &ServiceFactory,
) -> Result<()> {
    let Some(status) = transfer_precheck(chat_id, caller, policy, services).await else {
        return Ok(());
    };

    if let Some(refusal) = su_refusal(&status) {
        reply(services, chat_id, refusal).await;
        return Ok(());
    }

    if let Err(e) = services
        .telegram
        .promote_member(chat_id, caller.id, AdminRights::constrained())
        .await
    {
        log_api_error("promoteChatMember", &e, Some("su"));
        reply(services, chat_id, messages::SU_FAILED).await;
        return Ok(());
    }
    log_admin_action(caller.id.0 as i64, chat_id.0, "su", None);

    let title = Some(title)
        .filter(|t| !t.is_empty())
        .or(policy.admin_custom_title.as_deref());
    if let Some(title) = title {
        if let Err(e) = services.telegram.set_admin_title(chat_id, caller.id, title).await {
            warn!(chat_id = chat_id.0, user_id = caller.id.0, title = title, "Failed to set custom title");
            log_api_error("setChatAdministratorCustomTitle", &e, Some("su"));
        }
    }

    reply(services, chat_id, messages::SU_SUCCESS).await;
    Ok(())
}

/// Handle /exit
pub async fn handle_exit(
    chat_id: ChatId,
    caller: &User,
    policy: &GroupPolicy,
    services: &ServiceFactory,
) -> Result<()> {
    let Some(status) = transfer_precheck(chat_id, caller, policy, services).await else {
        return Ok(());
    };

    if let Some(refusal) = exit_refusal(&status) {
        reply(services, chat_id, refusal).await;
        return Ok(());
    }

    match services
        .telegram
        .promote_member(chat_id, caller.id, AdminRights::none())
        .await
    {
        Ok(()) => {
            log_admin_action(caller.id.0 as i64, chat_id.0, "exit", None);
            reply(services, chat_id, messages::EXIT_SUCCESS).await;
        }
        Err(e) => {
            log_api_error("promoteChatMember", &e, Some("exit"));
            reply(services, chat_id, messages::EXIT_FAILED).await;
        }
    }
    Ok(())
}

/// Shared gate for /su and /exit: the feature must be enabled and the caller
/// must administer the linked public group. Replies on refusal and returns
/// the caller's private group status otherwise.
async fn transfer_precheck(
    chat_id: ChatId,
    caller: &User,
    policy: &GroupPolicy,
    services: &ServiceFactory,
) -> Option<MemberStatus> {
    let public_id = match policy.link.public_id() {
        Some(public_id) if policy.allow_admin_transfer => public_id,
        _ => {
            reply(services, chat_id, messages::TRANSFER_DISABLED).await;
            return None;
        }
    };

    let auth = services.auth_middleware();
    match auth.check_group_admin(public_id, caller.id).await {
        Ok(_) => {}
        Err(GroupWardenError::PermissionDenied(_)) => {
            reply(services, chat_id, messages::TRANSFER_PUBLIC_ADMIN_ONLY).await;
            return None;
        }
        Err(e) => {
            log_api_error("getChatMember", &e, Some("public admin check"));
            reply(services, chat_id, messages::STATUS_UNAVAILABLE).await;
            return None;
        }
    }

    match auth.member_status(chat_id, caller.id).await {
        Ok(status) => {
            info!(chat_id = chat_id.0, user_id = caller.id.0, status = ?status, "Admin transfer requested");
            Some(status)
        }
        Err(e) => {
            log_api_error("getChatMember", &e, Some("private status"));
            reply(services, chat_id, messages::STATUS_UNAVAILABLE).await;
            None
        }
    }
}
