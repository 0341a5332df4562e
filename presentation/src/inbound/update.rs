//! Chat platform update model
//!
//! Mirrors the subset of a Telegram-style webhook update the bot reads: a
//! text message, a button press (callback query), or both.

use pickflick_domain::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// The message carrying the pressed button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Where an inbound token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundKind {
    /// Typed text
    Text { message_id: i64 },
    /// Button press on an earlier reply
    Callback { callback_id: String, message_id: i64 },
}

/// One event for the bot: who sent which token, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub participant: ParticipantId,
    pub token: String,
    pub kind: InboundKind,
}

impl InboundEvent {
    pub fn is_callback(&self) -> bool {
        matches!(self.kind, InboundKind::Callback { .. })
    }

    /// Callback query id to acknowledge, for button presses
    pub fn callback_id(&self) -> Option<&str> {
        match &self.kind {
            InboundKind::Callback { callback_id, .. } => Some(callback_id),
            InboundKind::Text { .. } => None,
        }
    }
}

impl Update {
    /// Events carried by this update, text message first
    ///
    /// Messages without text and callbacks without data (or without the
    /// message they belong to) carry nothing to handle and are dropped.
    pub fn into_events(self) -> Vec<InboundEvent> {
        let mut events = Vec::new();

        if let Some(Message {
            message_id,
            chat,
            text: Some(text),
        }) = self.message
        {
            events.push(InboundEvent {
                participant: ParticipantId::new(chat.id),
                token: text,
                kind: InboundKind::Text { message_id },
            });
        }

        if let Some(CallbackQuery {
            id,
            data: Some(data),
            message: Some(message),
        }) = self.callback_query
        {
            events.push(InboundEvent {
                participant: ParticipantId::new(message.chat.id),
                token: data,
                kind: InboundKind::Callback {
                    callback_id: id,
                    message_id: message.message_id,
                },
            });
        }

        events
    }
}
