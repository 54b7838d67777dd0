//! Message template engine
//!
//! Operator-authored templates use `{name}` placeholders. Rendering fills
//! them from a per-event [`TemplateContext`]; values are HTML-escaped since
//! every message is sent with the HTML parse mode. Unknown placeholders are
//! left in the output verbatim.

use std::collections::HashMap;
use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use teloxide::types::{Chat, User};
use teloxide::utils::html;
use crate::models::ChatInfo;
use crate::utils::helpers::{display_name, format_timestamp, user_mention_html};

/// Every placeholder a template may reference
pub const PLACEHOLDERS: &[&str] = &[
    "user_id",
    "user_name",
    "user_mention",
    "user_username",
    "chat_id",
    "chat_title",
    "chat_username",
    "timestamp",
    "invite_link",
    "private_chat_id",
    "private_chat_title",
    "private_chat_username",
];

pub const DEFAULT_WELCOME_PUBLIC_GROUP_MESSAGE: &str =
    "歡迎 {user_mention} 加入 {chat_title}！\n私人群組 {private_chat_title} 的邀請連結：{invite_link}";

pub const DEFAULT_WELCOME_PRIVATE_GROUP_MESSAGE: &str = "歡迎 {user_mention} 加入 {chat_title}！";

pub const DEFAULT_JOIN_REQUEST_MESSAGE: &str =
    "{user_mention}（<code>{user_id}</code>）申請加入 {chat_title}。";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// A message body with `{name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
}

impl MessageTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the placeholders referenced, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        placeholder_pattern()
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Whether the template references `name`
    pub fn uses(&self, name: &str) -> bool {
        self.placeholders().contains(&name)
    }

    /// Referenced names that no context will ever fill
    pub fn unknown_placeholders(&self) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !PLACEHOLDERS.contains(name))
            .collect()
    }

    /// Expand the template against `context`
    pub fn render(&self, context: &TemplateContext) -> String {
        placeholder_pattern()
            .replace_all(&self.source, |caps: &Captures| {
                let name = &caps[1];
                if PLACEHOLDERS.contains(&name) {
                    context.get(name).unwrap_or_default().to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

/// Values available to a template for one event
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<&'static str, String>,
}

impl TemplateContext {
    /// Start a context stamped with the event time
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        let mut values = HashMap::new();
        values.insert("timestamp", format_timestamp(timestamp));
        Self { values }
    }

    /// The user the event is about
    pub fn with_user(mut self, user: &User) -> Self {
        let name = display_name(&user.first_name, user.last_name.as_deref());
        self.values.insert("user_id", user.id.0.to_string());
        self.values.insert("user_mention", user_mention_html(user.id.0, &name));
        self.values.insert("user_name", html::escape(&name));
        if let Some(username) = &user.username {
            self.values.insert("user_username", format!("@{}", html::escape(username)));
        }
        self
    }

    /// The chat the event happened in
    pub fn with_chat(mut self, chat: &Chat) -> Self {
        self.values.insert("chat_id", chat.id.0.to_string());
        if let Some(title) = chat.title() {
            self.values.insert("chat_title", html::escape(title));
        }
        if let Some(username) = chat.username() {
            self.values.insert("chat_username", format!("@{}", html::escape(username)));
        }
        self
    }

    /// The linked private group's metadata
    pub fn with_private_chat(mut self, chat: &ChatInfo) -> Self {
        self.values.insert("private_chat_id", chat.id.0.to_string());
        if let Some(title) = &chat.title {
            self.values.insert("private_chat_title", html::escape(title));
        }
        if let Some(username) = &chat.username {
            self.values.insert("private_chat_username", format!("@{}", html::escape(username)));
        }
        self
    }

    pub fn with_invite_link(mut self, link: Option<&str>) -> Self {
        if let Some(link) = link {
            self.values.insert("invite_link", html::escape(link));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
