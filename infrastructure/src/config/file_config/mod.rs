//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Interpretation into application types happens through the `parse_*`
//! methods, which report fallbacks as [`ConfigIssue`]s.

mod logging;
mod output;
mod rooms;
mod slate;
mod store;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use rooms::FileRoomsConfig;
pub use slate::FileSlateConfig;
pub use store::{DEFAULT_STORE_PATH, FileStoreConfig, StoreBackend};

use super::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session table settings
    pub store: FileStoreConfig,
    /// Candidate slate settings
    pub slate: FileSlateConfig,
    /// Room code settings
    pub rooms: FileRoomsConfig,
    /// Journal and log file settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.store.parse_backend().1);
        if self.store.parse_backend().0 == StoreBackend::Csv {
            issues.extend(self.store.parse_path().1);
        }
        issues.extend(self.rooms.to_behavior_config().1);

        if self.slate.cache_dir.as_os_str().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "slate.cache_dir".to_string(),
                },
                "slate.cache_dir: empty, slates are read from the working directory",
            ));
        }

        issues
    }
}
