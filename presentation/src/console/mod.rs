//! Console transports: interactive session and update replay

mod bot;
mod input;
mod replay;

pub use bot::ConsoleBot;
pub use input::ConsoleInput;
pub use replay::{ReplayRunner, ReplaySummary};
