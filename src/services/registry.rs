//! Group policy registry
//!
//! Built once at startup. Each `[[groups]]` entry is merged over
//! `[defaults]` and then over the hardcoded defaults, producing an immutable
//! [`GroupPolicy`] indexed by its public and/or private chat id.

use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{info, warn};
use crate::config::{GroupEntry, GroupSettings, Settings};
use crate::models::{GroupLink, GroupPolicy, InviteLinkExpiry};
use crate::services::templates::{
    MessageTemplate, DEFAULT_JOIN_REQUEST_MESSAGE, DEFAULT_WELCOME_PRIVATE_GROUP_MESSAGE,
    DEFAULT_WELCOME_PUBLIC_GROUP_MESSAGE,
};
use crate::utils::errors::{GroupWardenError, Result};

/// Default lifetime of a generated invite link
pub const DEFAULT_INVITE_LINK_EXPIRED_SECONDS: u64 = 3600;

/// Immutable chat id -> policy lookup
#[derive(Debug, Default)]
pub struct GroupPolicyRegistry {
    public_groups: HashMap<i64, Arc<GroupPolicy>>,
    private_groups: HashMap<i64, Arc<GroupPolicy>>,
}

impl GroupPolicyRegistry {
    /// Build the registry from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_entries(&settings.groups, &settings.defaults)
    }

    /// Build the registry from raw entries and process-wide defaults
    pub fn from_entries(entries: &[GroupEntry], defaults: &GroupSettings) -> Result<Self> {
        let mut registry = Self::default();

        for (index, entry) in entries.iter().enumerate() {
            let policy = Arc::new(resolve_policy(index, entry, defaults)?);

            if let Some(public) = policy.link.public_id() {
                if registry.public_groups.insert(public.0, policy.clone()).is_some() {
                    return Err(GroupWardenError::Config(format!(
                        "Public group {} is configured more than once",
                        public.0
                    )));
                }
            }
            if let Some(private) = policy.link.private_id() {
                if registry.private_groups.insert(private.0, policy.clone()).is_some() {
                    return Err(GroupWardenError::Config(format!(
                        "Private group {} is configured more than once",
                        private.0
                    )));
                }
            }
        }

        info!(
            public_groups = registry.public_groups.len(),
            private_groups = registry.private_groups.len(),
            "Group policy registry built"
        );
        Ok(registry)
    }

    /// Policy of a configured public group
    pub fn public_group(&self, chat_id: ChatId) -> Option<Arc<GroupPolicy>> {
        self.public_groups.get(&chat_id.0).cloned()
    }

    /// Policy of a configured private group
    pub fn private_group(&self, chat_id: ChatId) -> Option<Arc<GroupPolicy>> {
        self.private_groups.get(&chat_id.0).cloned()
    }
}

fn resolve_policy(index: usize, entry: &GroupEntry, defaults: &GroupSettings) -> Result<GroupPolicy> {
    let link = GroupLink::from_ids(entry.public_group_id, entry.private_group_id).ok_or_else(|| {
        GroupWardenError::Config(format!(
            "Group entry #{} declares neither public_group_id nor private_group_id",
            index
        ))
    })?;

    if let GroupLink::Complete { public, private } = link {
        if public == private {
            return Err(GroupWardenError::Config(format!(
                "Group entry #{} uses {} as both public and private group",
                index, public.0
            )));
        }
    }

    let settings = entry.settings.or(defaults);
    let template = |value: &Option<String>, fallback: &str| {
        MessageTemplate::new(value.clone().unwrap_or_else(|| fallback.to_string()))
    };

    let policy = GroupPolicy {
        link,
        welcome_on_join_public_group: settings.welcome_on_join_public_group.unwrap_or(true),
        welcome_on_join_private_group: settings.welcome_on_join_private_group.unwrap_or(true),
        notify_join_request: settings.notify_join_request.unwrap_or(true),
        notify_join_request_with_approve_button: settings.notify_join_request_with_approve_button.unwrap_or(true),
        auto_accept_join_request_when_public_group_member: settings
            .auto_accept_join_request_when_public_group_member
            .unwrap_or(false),
        allow_admin_transfer: settings.allow_admin_transfer.unwrap_or(false),
        admin_custom_title: settings.admin_custom_title.clone().filter(|t| !t.trim().is_empty()),
        welcome_public_group_message: template(
            &settings.welcome_public_group_message,
            DEFAULT_WELCOME_PUBLIC_GROUP_MESSAGE,
        ),
        welcome_private_group_message: template(
            &settings.welcome_private_group_message,
            DEFAULT_WELCOME_PRIVATE_GROUP_MESSAGE,
        ),
        join_request_message: template(&settings.join_request_message, DEFAULT_JOIN_REQUEST_MESSAGE),
        invite_link_expired_time: settings
            .invite_link_expired_time
            .unwrap_or(InviteLinkExpiry::Seconds(DEFAULT_INVITE_LINK_EXPIRED_SECONDS)),
    };

    for (name, template) in [
        ("welcome_public_group_message", &policy.welcome_public_group_message),
        ("welcome_private_group_message", &policy.welcome_private_group_message),
        ("join_request_message", &policy.join_request_message),
    ] {
        let unknown = template.unknown_placeholders();
        if !unknown.is_empty() {
            warn!(entry = index, template = name, unknown = ?unknown, "Template references unknown placeholders");
        }
    }

    Ok(policy)
}
