//! Authentication middleware
//!
//! This module provides the authorization checks that protect bot commands
//! and join request buttons. Authority always comes from the caller's live
//! member status in the relevant chat.

use std::sync::Arc;
use teloxide::types::{ChatId, UserId};
use tracing::{debug, warn};
use crate::models::MemberStatus;
use crate::services::telegram::TelegramGateway;
use crate::utils::errors::{GroupWardenError, Result};

/// Authorization middleware
#[derive(Clone)]
pub struct AuthMiddleware {
    telegram: Arc<dyn TelegramGateway>,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(telegram: Arc<dyn TelegramGateway>) -> Self {
        Self { telegram }
    }

    /// Fetch a member's status in a chat
    pub async fn member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus> {
        self.telegram.get_member_status(chat_id, user_id).await
    }

    /// Require the creator or an administrator holding the invite-users right
    pub async fn check_invite_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus> {
        let status = self.member_status(chat_id, user_id).await?;

        if status.can_manage_invites() {
            debug!(chat_id = chat_id.0, user_id = user_id.0, "Invite admin check passed");
            Ok(status)
        } else {
            warn!(chat_id = chat_id.0, user_id = user_id.0, status = ?status, "Unauthorized invite admin attempt");
            Err(GroupWardenError::PermissionDenied(
                "Creator or administrator with invite rights required".to_string()
            ))
        }
    }

    /// Require the creator or any administrator
    pub async fn check_group_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus> {
        let status = self.member_status(chat_id, user_id).await?;

        if status.is_privileged() {
            debug!(chat_id = chat_id.0, user_id = user_id.0, "Group admin check passed");
            Ok(status)
        } else {
            warn!(chat_id = chat_id.0, user_id = user_id.0, status = ?status, "Unauthorized group admin attempt");
            Err(GroupWardenError::PermissionDenied(
                "Group administrator required".to_string()
            ))
        }
    }
}
