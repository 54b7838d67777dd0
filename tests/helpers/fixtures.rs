//! Update and policy fixtures
//!
//! teloxide updates are built from Bot API JSON, the same shape the
//! dispatcher receives.

use std::sync::Arc;
use serde_json::{json, Value};
use teloxide::types::{CallbackQuery, ChatJoinRequest, Message};
use tempfile::TempDir;
use GroupWarden::config::{GroupEntry, GroupSettings};
use GroupWarden::services::{GroupPolicyRegistry, ServiceFactory, TelegramGateway};
use GroupWarden::state::InviteLinkStore;
use super::gateway::MockTelegram;

pub const PUBLIC_GROUP: i64 = -1001;
pub const PRIVATE_GROUP: i64 = -100;
pub const EVENT_DATE: i64 = 1_700_000_000;

pub fn user_json(id: u64, first_name: &str) -> Value {
    json!({
        "id": id,
        "is_bot": false,
        "first_name": first_name,
        "username": format!("{}_tg", first_name.to_lowercase())
    })
}

pub fn chat_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "type": "supergroup",
        "title": title
    })
}

fn group_title(chat_id: i64) -> &'static str {
    if chat_id == PRIVATE_GROUP {
        "Private Lounge"
    } else {
        "Public Hall"
    }
}

/// A service message announcing `members` joined, sent by `from`
pub fn new_members_message(chat_id: i64, from: Value, members: Vec<Value>) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "date": EVENT_DATE,
        "chat": chat_json(chat_id, group_title(chat_id)),
        "from": from,
        "new_chat_members": members
    }))
    .expect("valid new_chat_members message")
}

/// A plain text message
pub fn text_message(chat_id: i64, from: Value, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 5,
        "date": EVENT_DATE,
        "chat": chat_json(chat_id, group_title(chat_id)),
        "from": from,
        "text": text
    }))
    .expect("valid text message")
}

pub fn join_request(chat_id: i64, from: Value) -> ChatJoinRequest {
    let user_id = from["id"].clone();
    serde_json::from_value(json!({
        "chat": chat_json(chat_id, group_title(chat_id)),
        "from": from,
        "user_chat_id": user_id,
        "date": EVENT_DATE
    }))
    .expect("valid chat join request")
}

/// A button press on a message living in `message_chat_id`
pub fn callback_query(from: Value, message_chat_id: i64, data: &str) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "cb-1",
        "from": from,
        "message": {
            "message_id": 77,
            "date": EVENT_DATE,
            "chat": chat_json(message_chat_id, group_title(message_chat_id)),
            "text": "join request"
        },
        "chat_instance": "instance-1",
        "data": data
    }))
    .expect("valid callback query")
}

/// The linked public/private pair used throughout the tests
pub fn complete_entry(settings: GroupSettings) -> GroupEntry {
    GroupEntry {
        public_group_id: Some(PUBLIC_GROUP),
        private_group_id: Some(PRIVATE_GROUP),
        settings,
    }
}

/// Services over a mock gateway and a store in a temporary directory
pub struct TestBed {
    pub services: ServiceFactory,
    pub telegram: Arc<MockTelegram>,
    pub dir: TempDir,
}

impl TestBed {
    pub async fn new(entries: Vec<GroupEntry>) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = InviteLinkStore::open(dir.path().join("invite_links.json"))
            .await
            .expect("store opens");
        let registry = GroupPolicyRegistry::from_entries(&entries, &GroupSettings::default())
            .expect("valid registry");

        let telegram = Arc::new(MockTelegram::new());
        let gateway: Arc<dyn TelegramGateway> = telegram.clone();
        let services = ServiceFactory::new(registry, store, gateway);

        Self { services, telegram, dir }
    }

    pub async fn with_settings(settings: GroupSettings) -> Self {
        Self::new(vec![complete_entry(settings)]).await
    }

    pub fn store_path(&self) -> std::path::PathBuf {
        self.dir.path().join("invite_links.json")
    }
}
