//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, SecondsFormat, Utc};
use teloxide::utils::html;

/// Format a timestamp as ISO 8601 / RFC 3339 in UTC
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Join first and last name the way Telegram clients display them
pub fn display_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name {
        Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
        _ => first_name.to_string(),
    }
}

/// Build an HTML mention link for a user
pub fn user_mention_html(user_id: u64, name: &str) -> String {
    format!("<a href=\"tg://user?id={}\">{}</a>", user_id, html::escape(name))
}

/// Milliseconds since the Unix epoch, used for quarantine file suffixes
pub fn unix_millis(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}
