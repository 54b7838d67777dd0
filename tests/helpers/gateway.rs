//! Recording in-memory Telegram gateway
//!
//! Answers member lookups from a configurable table and records every
//! outbound call so tests can assert on exactly what the bot did.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::types::{CallbackQuery, ChatId, InlineKeyboardMarkup, MessageId, UserId};
use GroupWarden::models::{AdminRights, ChatInfo, MemberStatus};
use GroupWarden::services::TelegramGateway;
use GroupWarden::{GroupWardenError, Result};

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

/// Everything the mock has seen, plus its configured answers
#[derive(Debug, Default)]
pub struct Recorded {
    pub statuses: HashMap<(i64, u64), MemberStatus>,
    pub chats: HashMap<i64, ChatInfo>,
    pub failing: HashSet<&'static str>,

    pub sent: Vec<SentMessage>,
    pub created_links: Vec<(i64, Option<DateTime<Utc>>)>,
    pub revoked_links: Vec<(i64, String)>,
    pub approved: Vec<(i64, u64)>,
    pub declined: Vec<(i64, u64)>,
    pub promotions: Vec<(i64, u64, AdminRights)>,
    pub titles: Vec<(i64, u64, String)>,
    pub cleared_markups: Vec<(i64, i32)>,
    /// (clicker, toast)
    pub answers: Vec<(u64, Option<String>)>,
    pub chat_lookups: usize,
}

#[derive(Debug, Default)]
pub struct MockTelegram {
    state: Mutex<Recorded>,
}

impl MockTelegram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.state.lock().unwrap()
    }

    pub fn set_status(&self, chat_id: i64, user_id: u64, status: MemberStatus) {
        self.recorded().statuses.insert((chat_id, user_id), status);
    }

    pub fn set_chat(&self, chat_id: i64, title: &str, username: Option<&str>) {
        self.recorded().chats.insert(
            chat_id,
            ChatInfo {
                id: ChatId(chat_id),
                title: Some(title.to_string()),
                username: username.map(str::to_owned),
            },
        );
    }

    /// Make every call of a gateway method fail
    pub fn fail(&self, method: &'static str) {
        self.recorded().failing.insert(method);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.recorded().sent.clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.recorded().sent.iter().map(|m| m.text.clone()).collect()
    }

    fn check(&self, method: &'static str) -> Result<()> {
        if self.recorded().failing.contains(method) {
            Err(GroupWardenError::ServiceUnavailable(format!("{} failed", method)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TelegramGateway for MockTelegram {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        self.check("send_message")?;
        self.recorded().sent.push(SentMessage { chat_id: chat_id.0, text, keyboard });
        Ok(())
    }

    async fn create_invite_link(&self, chat_id: ChatId, expire_date: Option<DateTime<Utc>>) -> Result<String> {
        self.check("create_invite_link")?;
        let mut state = self.recorded();
        state.created_links.push((chat_id.0, expire_date));
        Ok(format!("https://t.me/+link{}", state.created_links.len()))
    }

    async fn revoke_invite_link(&self, chat_id: ChatId, invite_link: &str) -> Result<()> {
        self.check("revoke_invite_link")?;
        self.recorded().revoked_links.push((chat_id.0, invite_link.to_string()));
        Ok(())
    }

    async fn get_member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus> {
        self.check("get_member_status")?;
        Ok(self
            .recorded()
            .statuses
            .get(&(chat_id.0, user_id.0))
            .copied()
            .unwrap_or(MemberStatus::Left))
    }

    async fn get_chat_info(&self, chat_id: ChatId) -> Result<ChatInfo> {
        self.check("get_chat_info")?;
        let mut state = self.recorded();
        state.chat_lookups += 1;
        let info = state.chats.get(&chat_id.0).cloned();
        info.ok_or_else(|| GroupWardenError::InvalidInput(format!("unknown chat {}", chat_id.0)))
    }

    async fn approve_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.check("approve_join_request")?;
        self.recorded().approved.push((chat_id.0, user_id.0));
        Ok(())
    }

    async fn decline_join_request(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.check("decline_join_request")?;
        self.recorded().declined.push((chat_id.0, user_id.0));
        Ok(())
    }

    async fn promote_member(&self, chat_id: ChatId, user_id: UserId, rights: AdminRights) -> Result<()> {
        self.check("promote_member")?;
        self.recorded().promotions.push((chat_id.0, user_id.0, rights));
        Ok(())
    }

    async fn set_admin_title(&self, chat_id: ChatId, user_id: UserId, title: &str) -> Result<()> {
        self.check("set_admin_title")?;
        self.recorded().titles.push((chat_id.0, user_id.0, title.to_string()));
        Ok(())
    }

    async fn clear_reply_markup(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.check("clear_reply_markup")?;
        self.recorded().cleared_markups.push((chat_id.0, message_id.0));
        Ok(())
    }

    async fn answer_callback(&self, query: &CallbackQuery, text: Option<String>) -> Result<()> {
        self.check("answer_callback")?;
        self.recorded().answers.push((query.from.id.0, text));
        Ok(())
    }
}
