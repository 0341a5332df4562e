//! Slate cache configuration from TOML (`[slate]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw slate configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSlateConfig {
    /// Directory holding the dated `<YYYY-MM-DD>.json` slate files
    pub cache_dir: PathBuf,
}

impl Default for FileSlateConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("db"),
        }
    }
}
