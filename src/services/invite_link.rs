//! Invite link lifecycle
//!
//! A private group's link moves NoLink -> Active -> (Expired | Revoked).
//! Expired links are cleared lazily without touching the API, since Telegram
//! already stops honouring them. Force revocation clears the local record
//! even when the remote call fails, so a link believed dead is never offered
//! again.
//!
//! Operations on the same group are serialised by a per-group async mutex
//! held across the whole read, remote call and persist sequence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use chrono::Utc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::models::{GroupPolicy, InviteLinkRecord};
use crate::services::telegram::TelegramGateway;
use crate::state::InviteLinkStore;
use crate::utils::logging::{log_api_error, log_group_event};

/// Result of [`InviteLinkManager::invalidate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    /// `true` when no usable link is left behind and, for a forced call,
    /// the remote revocation succeeded or was unnecessary
    pub revoked: bool,
    /// The link that was removed, if any
    pub previous_link: Option<String>,
}

impl Invalidation {
    fn nothing_to_do() -> Self {
        Self { revoked: true, previous_link: None }
    }

    fn still_active() -> Self {
        Self { revoked: false, previous_link: None }
    }
}

/// Creates, reuses and revokes the per-group invite links
pub struct InviteLinkManager {
    store: Arc<InviteLinkStore>,
    telegram: Arc<dyn TelegramGateway>,
    group_locks: StdMutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl InviteLinkManager {
    pub fn new(store: Arc<InviteLinkStore>, telegram: Arc<dyn TelegramGateway>) -> Self {
        Self {
            store,
            telegram,
            group_locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &InviteLinkStore {
        &self.store
    }

    fn group_lock(&self, group_id: ChatId) -> Arc<Mutex<()>> {
        self.group_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(group_id.0)
            .or_default()
            .clone()
    }

    /// Return the private group's usable invite link, creating one if needed.
    ///
    /// Returns `None` when the policy does not expose links or the remote
    /// creation fails.
    pub async fn ensure_link(&self, policy: &GroupPolicy) -> Option<String> {
        if !policy.exposes_invite_link() {
            debug!(link = ?policy.link, "Policy does not expose an invite link");
            return None;
        }
        let group_id = policy.link.private_id()?;

        let lock = self.group_lock(group_id);
        let _guard = lock.lock().await;

        let cleared = self.invalidate_locked(group_id, false).await;
        if !cleared.revoked {
            if let Some(record) = self.store.get(group_id.0) {
                debug!(group_id = group_id.0, "Reusing active invite link");
                return Some(record.link);
            }
        }

        let now = Utc::now();
        let expired_at = policy.invite_link_expired_time.expires_at(now);
        match self.telegram.create_invite_link(group_id, expired_at).await {
            Ok(link) => {
                self.store.put(group_id.0, InviteLinkRecord::new(link.clone(), expired_at));
                self.store.flush().await;
                log_group_event(group_id.0, "invite_link_created", None, Some(&link));
                Some(link)
            }
            Err(e) => {
                log_api_error("createChatInviteLink", &e, Some("ensure_link"));
                None
            }
        }
    }

    /// Clear the group's stored link if it is dead, or unconditionally when
    /// `force` is set (revoking it remotely as well).
    pub async fn invalidate(&self, group_id: ChatId, force: bool) -> Invalidation {
        let lock = self.group_lock(group_id);
        let _guard = lock.lock().await;
        self.invalidate_locked(group_id, force).await
    }

    async fn invalidate_locked(&self, group_id: ChatId, force: bool) -> Invalidation {
        let Some(record) = self.store.get(group_id.0) else {
            return Invalidation::nothing_to_do();
        };

        if record.is_expired(Utc::now()) {
            self.store.remove(group_id.0);
            self.store.flush().await;
            info!(group_id = group_id.0, expired_at = ?record.expired_at, "Expired invite link cleared");
            return Invalidation {
                revoked: true,
                previous_link: Some(record.link),
            };
        }

        if !force {
            return Invalidation::still_active();
        }

        self.store.remove(group_id.0);
        let revoked = match self.telegram.revoke_invite_link(group_id, &record.link).await {
            Ok(()) => {
                log_group_event(group_id.0, "invite_link_revoked", None, Some(&record.link));
                true
            }
            Err(e) => {
                warn!(group_id = group_id.0, link = %record.link, "Remote revocation failed, dropping link locally");
                log_api_error("revokeChatInviteLink", &e, Some("invalidate"));
                false
            }
        };
        self.store.flush().await;

        Invalidation {
            revoked,
            previous_link: Some(record.link),
        }
    }
}
