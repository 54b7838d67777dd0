//! Group policy model

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use teloxide::types::ChatId;
use crate::services::templates::MessageTemplate;

/// Longest accepted link lifetime, one hundred years
pub const MAX_EXPIRY_SECONDS: u64 = 100 * 366 * 24 * 60 * 60;

/// How long a freshly created invite link stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawExpiry")]
pub enum InviteLinkExpiry {
    Seconds(u64),
    Never,
}

/// Accepts either a number of seconds or `false`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpiry {
    Seconds(u64),
    Flag(bool),
}

impl TryFrom<RawExpiry> for InviteLinkExpiry {
    type Error = String;

    fn try_from(raw: RawExpiry) -> Result<Self, Self::Error> {
        match raw {
            RawExpiry::Seconds(0) => Err("invite_link_expired_time must be greater than 0".to_string()),
            RawExpiry::Seconds(seconds) if seconds > MAX_EXPIRY_SECONDS => Err(format!(
                "invite_link_expired_time must be at most {} seconds",
                MAX_EXPIRY_SECONDS
            )),
            RawExpiry::Seconds(seconds) => Ok(InviteLinkExpiry::Seconds(seconds)),
            RawExpiry::Flag(false) => Ok(InviteLinkExpiry::Never),
            RawExpiry::Flag(true) => {
                Err("invite_link_expired_time must be a number of seconds or false".to_string())
            }
        }
    }
}

impl InviteLinkExpiry {
    /// Expiry instant for a link created at `now`
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            InviteLinkExpiry::Seconds(seconds) => {
                let seconds = i64::try_from(*seconds).unwrap_or(i64::MAX);
                Duration::try_seconds(seconds).and_then(|d| now.checked_add_signed(d))
            }
            InviteLinkExpiry::Never => None,
        }
    }
}

/// Which chats a policy governs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLink {
    PublicOnly(ChatId),
    PrivateOnly(ChatId),
    Complete { public: ChatId, private: ChatId },
}

impl GroupLink {
    /// Build from the raw optional identifiers; `None` when both are missing
    pub fn from_ids(public: Option<i64>, private: Option<i64>) -> Option<Self> {
        match (public, private) {
            (Some(public), Some(private)) => Some(GroupLink::Complete {
                public: ChatId(public),
                private: ChatId(private),
            }),
            (Some(public), None) => Some(GroupLink::PublicOnly(ChatId(public))),
            (None, Some(private)) => Some(GroupLink::PrivateOnly(ChatId(private))),
            (None, None) => None,
        }
    }

    pub fn public_id(&self) -> Option<ChatId> {
        match self {
            GroupLink::PublicOnly(public) | GroupLink::Complete { public, .. } => Some(*public),
            GroupLink::PrivateOnly(_) => None,
        }
    }

    pub fn private_id(&self) -> Option<ChatId> {
        match self {
            GroupLink::PrivateOnly(private) | GroupLink::Complete { private, .. } => Some(*private),
            GroupLink::PublicOnly(_) => None,
        }
    }
}

/// Fully resolved, immutable behaviour for one group pairing
#[derive(Debug, Clone)]
pub struct GroupPolicy {
    pub link: GroupLink,
    pub welcome_on_join_public_group: bool,
    pub welcome_on_join_private_group: bool,
    pub notify_join_request: bool,
    pub notify_join_request_with_approve_button: bool,
    pub auto_accept_join_request_when_public_group_member: bool,
    pub allow_admin_transfer: bool,
    pub admin_custom_title: Option<String>,
    pub welcome_public_group_message: MessageTemplate,
    pub welcome_private_group_message: MessageTemplate,
    pub join_request_message: MessageTemplate,
    pub invite_link_expired_time: InviteLinkExpiry,
}

impl GroupPolicy {
    /// Whether the private side of this policy may hand out invite links.
    /// Links are only ever advertised through the public group's welcome.
    pub fn exposes_invite_link(&self) -> bool {
        self.link.public_id().is_some()
            && self.link.private_id().is_some()
            && self.welcome_on_join_public_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Holder {
        expiry: InviteLinkExpiry,
    }

    #[test]
    fn test_expiry_accepts_seconds_or_false() {
        let holder: Holder = serde_json::from_str(r#"{"expiry": 60}"#).unwrap();
        assert_eq!(holder.expiry, InviteLinkExpiry::Seconds(60));

        let holder: Holder = serde_json::from_str(r#"{"expiry": false}"#).unwrap();
        assert_eq!(holder.expiry, InviteLinkExpiry::Never);
    }

    #[test]
    fn test_expiry_rejects_true_and_zero() {
        assert!(serde_json::from_str::<Holder>(r#"{"expiry": true}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"expiry": 0}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"expiry": "soon"}"#).is_err());
    }

    #[test]
    fn test_expiry_rejects_out_of_range_seconds() {
        assert!(serde_json::from_str::<Holder>(r#"{"expiry": 10000000000000}"#).is_err());
        assert!(serde_json::from_str::<Holder>(&format!(r#"{{"expiry": {}}}"#, MAX_EXPIRY_SECONDS + 1)).is_err());

        let holder: Holder = serde_json::from_str(&format!(r#"{{"expiry": {}}}"#, MAX_EXPIRY_SECONDS)).unwrap();
        assert!(holder.expiry.expires_at(Utc::now()).is_some());
    }

    #[test]
    fn test_expires_at() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            InviteLinkExpiry::Seconds(60).expires_at(now),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap())
        );
        assert_eq!(InviteLinkExpiry::Never.expires_at(now), None);
    }

    #[test]
    fn test_group_link_from_ids() {
        assert_eq!(GroupLink::from_ids(None, None), None);

        let link = GroupLink::from_ids(Some(-1), Some(-2)).unwrap();
        assert_eq!(link.public_id(), Some(ChatId(-1)));
        assert_eq!(link.private_id(), Some(ChatId(-2)));

        let link = GroupLink::from_ids(None, Some(-2)).unwrap();
        assert_eq!(link.public_id(), None);
        assert_eq!(link.private_id(), Some(ChatId(-2)));
    }
}
