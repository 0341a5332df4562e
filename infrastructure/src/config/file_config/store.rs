//! Session store configuration from TOML (`[store]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the session table
pub const DEFAULT_STORE_PATH: &str = "db/sessions.csv";

/// Which [`SessionStore`](pickflick_application::SessionStore) adapter to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Flat four-column CSV file
    #[default]
    Csv,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "file" => Ok(StoreBackend::Csv),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Csv => write!(f, "csv"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Raw store configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// "csv" or "memory"
    pub backend: String,
    /// Session table path (csv backend)
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Csv.to_string(),
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl FileStoreConfig {
    /// Parse the backend string, falling back to csv
    pub fn parse_backend(&self) -> (StoreBackend, Vec<ConfigIssue>) {
        match self.backend.parse::<StoreBackend>() {
            Ok(backend) => (backend, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "store.backend".to_string(),
                        value: self.backend.clone(),
                        valid_values: vec!["csv".to_string(), "memory".to_string()],
                    },
                    format!(
                        "store.backend: unknown value '{}', falling back to 'csv'",
                        self.backend
                    ),
                );
                (StoreBackend::default(), vec![issue])
            }
        }
    }

    /// Table path, falling back to the default when empty
    ///
    /// A path naming an existing directory is an error: the table could
    /// never be written there.
    pub fn parse_path(&self) -> (PathBuf, Vec<ConfigIssue>) {
        if self.path.is_dir() {
            let issue = ConfigIssue::error(
                ConfigIssueCode::PathIsDirectory {
                    field: "store.path".to_string(),
                    path: self.path.display().to_string(),
                },
                format!("store.path: '{}' is a directory", self.path.display()),
            );
            (self.path.clone(), vec![issue])
        } else if self.path.as_os_str().is_empty() {
            let issue = ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "store.path".to_string(),
                },
                format!("store.path: empty, falling back to '{}'", DEFAULT_STORE_PATH),
            );
            (PathBuf::from(DEFAULT_STORE_PATH), vec![issue])
        } else {
            (self.path.clone(), vec![])
        }
    }
}
