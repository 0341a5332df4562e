//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL event journal; no journal when unset
    pub journal: Option<PathBuf>,
    /// Directory for daily rolling diagnostic log files
    pub dir: Option<PathBuf>,
}
