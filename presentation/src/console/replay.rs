//! Replay of recorded platform updates
//!
//! Reads one JSON [`Update`] per line and feeds its events through the
//! dispatcher, in file order.

use crate::bot::{BotDispatcher, Dispatched};
use crate::inbound::Update;
use crate::output::console::ConsoleFormatter;
use pickflick_application::{RoomCodeGenerator, SessionStore, SlateSource};
use std::io::{self, BufRead};
use tracing::{info, warn};

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Updates read successfully
    pub updates: usize,
    /// Events dispatched without error
    pub handled: usize,
    /// Lines that were not valid updates
    pub skipped: usize,
    /// Events the bot failed to handle
    pub failed: usize,
}

pub struct ReplayRunner<'a, S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    dispatcher: &'a BotDispatcher<S, L, R>,
    echo: bool,
}

impl<'a, S, L, R> ReplayRunner<'a, S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    pub fn new(dispatcher: &'a BotDispatcher<S, L, R>) -> Self {
        Self {
            dispatcher,
            echo: true,
        }
    }

    /// Set whether replies are printed
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Replay every update in `reader`, returning what happened
    pub async fn run(&self, reader: impl BufRead) -> io::Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let update: Update = match serde_json::from_str(&line) {
                Ok(update) => update,
                Err(e) => {
                    warn!("Skipping line {}: not an update ({})", number + 1, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.updates += 1;

            for event in update.into_events() {
                let token = event.token.clone();
                match self.dispatcher.dispatch(event).await {
                    Ok(dispatched) => {
                        summary.handled += 1;
                        self.echo(&token, &dispatched);
                    }
                    Err(e) => {
                        warn!("Line {}: could not handle {:?}: {}", number + 1, token, e);
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            "Replayed {} updates ({} events handled, {} failed, {} lines skipped)",
            summary.updates, summary.handled, summary.failed, summary.skipped
        );
        Ok(summary)
    }

    fn echo(&self, token: &str, dispatched: &Dispatched) {
        if !self.echo {
            return;
        }
        println!("{} > {}", dispatched.view.participant, token);
        println!(
            "{}",
            ConsoleFormatter::indent(&ConsoleFormatter::format_dispatched(dispatched), "  ")
        );
        println!();
    }
}
