//! Telegram adapter tests against a mock Bot API server

mod helpers;

use serde_json::json;
use serial_test::serial;
use teloxide::types::{ChatId, UserId};
use GroupWarden::handlers::callbacks::payload::join_request_keyboard;
use GroupWarden::models::MemberStatus;
use GroupWarden::services::{TelegramBotAdapter, TelegramGateway};
use GroupWarden::GroupWardenError;
use helpers::*;

#[tokio::test]
#[serial]
async fn test_send_message_uses_html_and_keyboard() {
    let mock_server = TelegramMockServer::new().await;
    mock_server.mock_send_message(MockResponseConfig::default()).await;
    let adapter = TelegramBotAdapter::new(mock_server.bot());

    adapter
        .send_message(
            ChatId(-100),
            "<b>hello</b>".to_string(),
            Some(join_request_keyboard(ChatId(-100), UserId(42))),
        )
        .await
        .unwrap();

    let requests = mock_server.requests_for("sendMessage").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["chat_id"], json!(-100));
    assert_eq!(requests[0]["text"], json!("<b>hello</b>"));
    assert_eq!(requests[0]["parse_mode"], json!("HTML"));
    assert_eq!(
        requests[0]["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
        json!("jr:approve:-100:42")
    );
}

#[tokio::test]
#[serial]
async fn test_create_invite_link_requires_join_request() {
    let mock_server = TelegramMockServer::new().await;
    mock_server
        .mock_create_invite_link("https://t.me/+abc", MockResponseConfig::default())
        .await;
    let adapter = TelegramBotAdapter::new(mock_server.bot());

    let link = adapter.create_invite_link(ChatId(-100), None).await.unwrap();

    assert_eq!(link, "https://t.me/+abc");
    let requests = mock_server.requests_for("createChatInviteLink").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["creates_join_request"], json!(true));
    assert!(requests[0].get("expire_date").map_or(true, |v| v.is_null()));
}

fn member_json(status: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut member = json!({
        "status": status,
        "user": { "id": 7, "is_bot": false, "first_name": "Mod" }
    });
    if let (Some(member), Some(extra)) = (member.as_object_mut(), extra.as_object()) {
        member.extend(extra.clone());
    }
    member
}

fn administrator_json(can_invite_users: bool, can_be_edited: bool) -> serde_json::Value {
    member_json(
        "administrator",
        json!({
            "is_anonymous": false,
            "can_be_edited": can_be_edited,
            "can_manage_chat": true,
            "can_change_info": false,
            "can_delete_messages": true,
            "can_manage_video_chats": false,
            "can_invite_users": can_invite_users,
            "can_restrict_members": true,
            "can_promote_members": false
        }),
    )
}

fn restricted_json(can_send_messages: bool) -> serde_json::Value {
    member_json(
        "restricted",
        json!({
            "until_date": 0,
            "is_member": true,
            "can_send_messages": can_send_messages,
            "can_send_audios": false,
            "can_send_documents": false,
            "can_send_photos": false,
            "can_send_videos": false,
            "can_send_video_notes": false,
            "can_send_voice_notes": false,
            "can_send_other_messages": false,
            "can_add_web_page_previews": false,
            "can_change_info": false,
            "can_invite_users": false,
            "can_pin_messages": false,
            "can_manage_topics": false,
            "can_send_polls": false
        }),
    )
}

async fn member_status_for(member: serde_json::Value) -> MemberStatus {
    let mock_server = TelegramMockServer::new().await;
    mock_server
        .mock_get_chat_member(member, MockResponseConfig::default())
        .await;
    let adapter = TelegramBotAdapter::new(mock_server.bot());

    adapter.get_member_status(ChatId(-100), UserId(7)).await.unwrap()
}

#[tokio::test]
#[serial]
async fn test_get_member_status_maps_kinds() {
    let cases = vec![
        (member_json("creator", json!({ "is_anonymous": false })), MemberStatus::Owner),
        (
            administrator_json(true, true),
            MemberStatus::Administrator { can_invite_users: true, can_be_edited: true },
        ),
        (
            administrator_json(false, false),
            MemberStatus::Administrator { can_invite_users: false, can_be_edited: false },
        ),
        (member_json("member", json!({})), MemberStatus::Member),
        (restricted_json(true), MemberStatus::Restricted { can_send_messages: true }),
        (restricted_json(false), MemberStatus::Restricted { can_send_messages: false }),
        (member_json("left", json!({})), MemberStatus::Left),
        (member_json("kicked", json!({ "until_date": 0 })), MemberStatus::Banned),
    ];

    for (member, expected) in cases {
        let status = member_status_for(member.clone()).await;
        assert_eq!(status, expected, "{}", member);
    }
}

#[tokio::test]
#[serial]
async fn test_restricted_member_without_send_rights_does_not_qualify_for_auto_accept() {
    assert!(member_status_for(restricted_json(true)).await.qualifies_for_auto_accept());
    assert!(!member_status_for(restricted_json(false)).await.qualifies_for_auto_accept());
    assert!(!member_status_for(member_json("kicked", json!({ "until_date": 0 }))).await.qualifies_for_auto_accept());
}

#[tokio::test]
#[serial]
async fn test_api_errors_surface_as_telegram_errors() {
    let mock_server = TelegramMockServer::new().await;
    mock_server
        .mock_send_message(MockResponseConfig {
            success: false,
            ..MockResponseConfig::default()
        })
        .await;
    let adapter = TelegramBotAdapter::new(mock_server.bot());

    let err = adapter
        .send_message(ChatId(-100), "hello".to_string(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, GroupWardenError::Telegram(_)), "{:?}", err);
    assert!(err.is_recoverable());
}
