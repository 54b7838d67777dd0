//! Mock Telegram API server for testing
//!
//! A wiremock server standing in for the Bot API, so the real
//! `TelegramBotAdapter` can be exercised end to end over HTTP.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Bot token used against the mock server
pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl TelegramMockServer {
    /// Start a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        let url = self.server.uri().parse().expect("mock server uri is a valid url");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    /// Mount a response for a Bot API method (matched case-insensitively)
    pub async fn mock_method(&self, api_method: &str, result: Value, config: MockResponseConfig) {
        let response_body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({ "ok": true, "result": result })
            } else {
                json!({
                    "ok": false,
                    "error_code": 400,
                    "description": "Bad Request: chat not found"
                })
            }
        });

        let mut response = ResponseTemplate::new(if config.success { 200 } else { 400 })
            .set_body_json(response_body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path_regex(format!(r"(?i)^/bot[^/]+/{}$", api_method)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        let message = json!({
            "message_id": 123,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "WardenBot",
                "username": "warden_bot"
            },
            "chat": {
                "id": -1001234567890_i64,
                "title": "Test Group",
                "type": "supergroup"
            },
            "date": 1640995200,
            "text": "Test message"
        });
        self.mock_method("sendMessage", message, config).await;
    }

    /// Setup mock for createChatInviteLink endpoint
    pub async fn mock_create_invite_link(&self, link: &str, config: MockResponseConfig) {
        let invite = json!({
            "invite_link": link,
            "creator": {
                "id": 12345,
                "is_bot": true,
                "first_name": "WardenBot",
                "username": "warden_bot"
            },
            "creates_join_request": true,
            "is_primary": false,
            "is_revoked": false
        });
        self.mock_method("createChatInviteLink", invite, config).await;
    }

    /// Setup mock for getChatMember endpoint returning a raw member object
    pub async fn mock_get_chat_member(&self, member: Value, config: MockResponseConfig) {
        self.mock_method("getChatMember", member, config).await;
    }

    /// Requests received for a Bot API method, as JSON bodies
    pub async fn requests_for(&self, api_method: &str) -> Vec<Value> {
        let suffix = format!("/{}", api_method.to_lowercase());
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&suffix))
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}
