//! Invite link model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The invite link currently handed out for one private group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteLinkRecord {
    pub link: String,
    /// `None` means the link never expires
    pub expired_at: Option<DateTime<Utc>>,
}

impl InviteLinkRecord {
    pub fn new(link: impl Into<String>, expired_at: Option<DateTime<Utc>>) -> Self {
        Self {
            link: link.into(),
            expired_at,
        }
    }

    /// A record past its expiry is dead even if it is still stored
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expired_at, Some(expired_at) if expired_at <= now)
    }
}
