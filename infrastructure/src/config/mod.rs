//! Configuration file loading for pickflick
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `PICKFLICK_<SECTION>__<KEY>` (e.g. `PICKFLICK_STORE__BACKEND`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./pickflick.toml` or `./.pickflick.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/pickflick/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    DEFAULT_STORE_PATH, FileConfig, FileLoggingConfig, FileOutputConfig, FileRoomsConfig,
    FileSlateConfig, FileStoreConfig, StoreBackend,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::ConfigLoader;
