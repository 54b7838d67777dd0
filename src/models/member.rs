//! Chat member and chat metadata models
//!
//! Transport-neutral views of what the Bot API reports about a member, so
//! that authorization rules can be written and tested without teloxide types.

use teloxide::types::ChatId;

/// A user's standing inside one chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Owner,
    Administrator {
        can_invite_users: bool,
        /// Whether the bot itself is allowed to edit this administrator
        can_be_edited: bool,
    },
    Member,
    Restricted {
        can_send_messages: bool,
    },
    Left,
    Banned,
}

impl MemberStatus {
    /// Anything except `left` and `kicked`
    pub fn is_present(&self) -> bool {
        !matches!(self, MemberStatus::Left | MemberStatus::Banned)
    }

    /// Creator or any administrator
    pub fn is_privileged(&self) -> bool {
        matches!(self, MemberStatus::Owner | MemberStatus::Administrator { .. })
    }

    /// Creator, or an administrator holding the invite-users right
    pub fn can_manage_invites(&self) -> bool {
        matches!(
            self,
            MemberStatus::Owner | MemberStatus::Administrator { can_invite_users: true, .. }
        )
    }

    /// Membership in the public group that earns automatic approval
    pub fn qualifies_for_auto_accept(&self) -> bool {
        match self {
            MemberStatus::Left | MemberStatus::Banned => false,
            MemberStatus::Restricted { can_send_messages } => *can_send_messages,
            _ => true,
        }
    }
}

/// Display metadata of a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInfo {
    pub id: ChatId,
    pub title: Option<String>,
    pub username: Option<String>,
}

/// Rights granted by `/su`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminRights {
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_restrict_members: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
    pub can_manage_video_chats: bool,
    pub can_change_info: bool,
    pub can_promote_members: bool,
}

impl AdminRights {
    /// Moderation rights without the power to reshape the group or its staff
    pub fn constrained() -> Self {
        Self {
            can_manage_chat: true,
            can_delete_messages: true,
            can_restrict_members: true,
            can_invite_users: true,
            can_pin_messages: true,
            can_manage_video_chats: true,
            can_change_info: false,
            can_promote_members: false,
        }
    }

    /// No rights at all; promoting with these demotes the member
    pub fn none() -> Self {
        Self {
            can_manage_chat: false,
            can_delete_messages: false,
            can_restrict_members: false,
            can_invite_users: false,
            can_pin_messages: false,
            can_manage_video_chats: false,
            can_change_info: false,
            can_promote_members: false,
        }
    }
}
