//! Presentation-level configuration
//!
//! Configuration for output formatting and the console session.

use pickflick_domain::ParticipantId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl OutputConfig {
    /// Apply the color setting to everything printed through `colored`
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// Console session configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Participant the session starts as
    pub participant: ParticipantId,
    /// Line history file; `None` uses the platform data directory
    pub history_file: Option<PathBuf>,
    /// Keep no history at all
    pub no_history: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            participant: ParticipantId::new(1),
            history_file: None,
            no_history: false,
        }
    }
}

impl ConsoleConfig {
    pub fn with_participant(mut self, participant: ParticipantId) -> Self {
        self.participant = participant;
        self
    }

    /// Where line history is kept, if anywhere
    pub fn history_path(&self) -> Option<PathBuf> {
        if self.no_history {
            return None;
        }
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("pickflick").join("history.txt")))
    }
}
