//! Telegram gateway
//!
//! Every outbound Bot API call the bot makes goes through [`TelegramGateway`].
//! Production code uses [`TelegramBotAdapter`] over `teloxide::Bot`; tests
//! substitute an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, ChatMemberKind, InlineKeyboardMarkup, MessageId, ParseMode, UserId};
use tracing::debug;
use crate::models::{AdminRights, ChatInfo, MemberStatus};
use crate::utils::errors::Result;

/// Outbound Telegram operations
#[async_trait]
pub trait TelegramGateway: Send + Sync {
    /// Send an HTML message, optionally with an inline keyboard
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    /// Create a join-request-gated invite link
    async fn create_invite_link(&self, chat_id: ChatId, expire_date: Option<DateTime<Utc>>) -> Result<String>;

    async fn revoke_invite_link(&self, chat_id: ChatId, invite_link: &str) -> Result<()>;

    async fn get_member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus>;

    async fn get_chat_info(&self, chat_id: ChatId) -> Result<ChatInfo>;

    async fn approve_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    async fn decline_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    /// Promote a member; promoting with [`AdminRights::none`] demotes
    async fn promote_member(&self, chat_id: ChatId, user_id: UserId, rights: AdminRights) -> Result<()>;

    async fn set_admin_title(&self, chat_id: ChatId, user_id: UserId, title: &str) -> Result<()>;

    /// Remove the inline keyboard from a message
    async fn clear_reply_markup(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    /// Answer a button press, optionally with a toast
    async fn answer_callback(&self, query: &CallbackQuery, text: Option<String>) -> Result<()>;
}

/// Map teloxide's member kind onto [`MemberStatus`]
pub fn member_status_from_kind(kind: &ChatMemberKind) -> MemberStatus {
    match kind {
        ChatMemberKind::Owner(_) => MemberStatus::Owner,
        ChatMemberKind::Administrator(admin) => MemberStatus::Administrator {
            can_invite_users: admin.can_invite_users,
            can_be_edited: admin.can_be_edited,
        },
        ChatMemberKind::Member => MemberStatus::Member,
        ChatMemberKind::Restricted(restricted) => MemberStatus::Restricted {
            can_send_messages: restricted.can_send_messages,
        },
        ChatMemberKind::Left => MemberStatus::Left,
        ChatMemberKind::Banned(_) => MemberStatus::Banned,
    }
}

/// [`TelegramGateway`] backed by a real `teloxide::Bot`
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl TelegramGateway for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
        Ok(())
    }

    async fn create_invite_link(&self, chat_id: ChatId, expire_date: Option<DateTime<Utc>>) -> Result<String> {
        let mut request = self.bot.create_chat_invite_link(chat_id).creates_join_request(true);
        if let Some(expire_date) = expire_date {
            request = request.expire_date(expire_date);
        }
        let link = request.await?;
        debug!(chat_id = chat_id.0, "Invite link created");
        Ok(link.invite_link)
    }

    async fn revoke_invite_link(&self, chat_id: ChatId, invite_link: &str) -> Result<()> {
        self.bot.revoke_chat_invite_link(chat_id, invite_link).await?;
        Ok(())
    }

    async fn get_member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus> {
        let member = self.bot.get_chat_member(chat_id, user_id).await?;
        Ok(member_status_from_kind(&member.kind))
    }

    async fn get_chat_info(&self, chat_id: ChatId) -> Result<ChatInfo> {
        let chat = self.bot.get_chat(chat_id).await?;
        Ok(ChatInfo {
            id: chat.id,
            title: chat.title().map(str::to_owned),
            username: chat.username().map(str::to_owned),
        })
    }

    async fn approve_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot.approve_chat_join_request(chat_id, user_id).await?;
        Ok(())
    }

    async fn decline_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.bot.decline_chat_join_request(chat_id, user_id).await?;
        Ok(())
    }

    async fn promote_member(&self, chat_id: ChatId, user_id: UserId, rights: AdminRights) -> Result<()> {
        self.bot
            .promote_chat_member(chat_id, user_id)
            .can_manage_chat(rights.can_manage_chat)
            .can_delete_messages(rights.can_delete_messages)
            .can_restrict_members(rights.can_restrict_members)
            .can_invite_users(rights.can_invite_users)
            .can_pin_messages(rights.can_pin_messages)
            .can_manage_video_chats(rights.can_manage_video_chats)
            .can_change_info(rights.can_change_info)
            .can_promote_members(rights.can_promote_members)
            .await?;
        Ok(())
    }

    async fn set_admin_title(&self, chat_id: ChatId, user_id: UserId, title: &str) -> Result<()> {
        self.bot
            .set_chat_administrator_custom_title(chat_id, user_id, title)
            .await?;
        Ok(())
    }

    async fn clear_reply_markup(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot.edit_message_reply_markup(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, query: &CallbackQuery, text: Option<String>) -> Result<()> {
        let mut request = self.bot.answer_callback_query(query.id.clone());
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await?;
        Ok(())
    }
}
