//! Presentation layer for pickflick
//!
//! This crate contains CLI definitions, reply composition, the inbound
//! update model, and the console transports that drive the bot.

pub mod bot;
pub mod cli;
pub mod config;
pub mod console;
pub mod inbound;
pub mod output;
pub mod reply;

// Re-export commonly used types
pub use bot::{BotDispatcher, Dispatched};
pub use cli::commands::Cli;
pub use config::{ConsoleConfig, OutputConfig};
pub use console::{ConsoleBot, ReplayRunner, ReplaySummary};
pub use inbound::{InboundEvent, InboundKind, Update};
pub use output::console::ConsoleFormatter;
pub use reply::{Button, Delivery, Reply, ReplyComposer};
