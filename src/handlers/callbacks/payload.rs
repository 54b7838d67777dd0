//! Callback payload encoding
//!
//! Join request buttons carry `jr:<approve|decline>:<chatId>:<userId>`.
//! Payloads are parsed into a typed [`CallbackCommand`] before dispatch.

use std::fmt;
use std::str::FromStr;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, UserId};
use crate::i18n::messages;
use crate::utils::errors::GroupWardenError;

const JOIN_REQUEST_PREFIX: &str = "jr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRequestAction {
    Approve,
    Decline,
}

impl JoinRequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinRequestAction::Approve => "approve",
            JoinRequestAction::Decline => "decline",
        }
    }
}

/// A parsed inline button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackCommand {
    JoinRequest {
        action: JoinRequestAction,
        chat_id: ChatId,
        user_id: UserId,
    },
}

impl fmt::Display for CallbackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackCommand::JoinRequest { action, chat_id, user_id } => write!(
                f,
                "{}:{}:{}:{}",
                JOIN_REQUEST_PREFIX,
                action.as_str(),
                chat_id.0,
                user_id.0
            ),
        }
    }
}

impl FromStr for CallbackCommand {
    type Err = GroupWardenError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let invalid = || GroupWardenError::InvalidInput(format!("Unknown callback payload: {:?}", data));

        let parts: Vec<&str> = data.split(':').collect();
        let [kind, action, chat_id, user_id] = parts.as_slice() else {
            return Err(invalid());
        };
        if *kind != JOIN_REQUEST_PREFIX {
            return Err(invalid());
        }

        let action = match *action {
            "approve" => JoinRequestAction::Approve,
            "decline" => JoinRequestAction::Decline,
            _ => return Err(invalid()),
        };
        let chat_id = chat_id.parse::<i64>().map_err(|_| invalid())?;
        let user_id = user_id.parse::<u64>().map_err(|_| invalid())?;

        Ok(CallbackCommand::JoinRequest {
            action,
            chat_id: ChatId(chat_id),
            user_id: UserId(user_id),
        })
    }
}

/// Approve / Decline buttons for one pending request
pub fn join_request_keyboard(chat_id: ChatId, user_id: UserId) -> InlineKeyboardMarkup {
    let button = |label: &str, action| {
        let payload = CallbackCommand::JoinRequest { action, chat_id, user_id };
        InlineKeyboardButton::callback(label.to_string(), payload.to_string())
    };

    InlineKeyboardMarkup::new(vec![vec![
        button(messages::BUTTON_APPROVE, JoinRequestAction::Approve),
        button(messages::BUTTON_DECLINE, JoinRequestAction::Decline),
    ]])
}
