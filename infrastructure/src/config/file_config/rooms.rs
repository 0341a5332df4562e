//! Room configuration from TOML (`[rooms]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use pickflick_application::BehaviorConfig;
use pickflick_application::config::DEFAULT_ROOM_CODE_ATTEMPTS;
use serde::{Deserialize, Serialize};

/// Raw room configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoomsConfig {
    /// How many fresh codes to try when a generated one is already taken
    pub code_attempts: usize,
}

impl Default for FileRoomsConfig {
    fn default() -> Self {
        Self {
            code_attempts: DEFAULT_ROOM_CODE_ATTEMPTS,
        }
    }
}

impl FileRoomsConfig {
    pub fn to_behavior_config(&self) -> (BehaviorConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.code_attempts == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "rooms.code_attempts".to_string(),
                    value: 0,
                },
                "rooms.code_attempts: must be at least 1, using 1",
            ));
        }
        let config = BehaviorConfig::with_room_code_attempts(self.code_attempts);
        (config, issues)
    }
}
