//! Inbound events from the chat platform

mod update;

pub use update::{CallbackQuery, Chat, InboundEvent, InboundKind, Message, Update};
