//! Infrastructure layer for pickflick
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod room_codes;
pub mod slate;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig, FileStoreConfig,
    Severity, StoreBackend,
};
pub use logging::JsonlEventJournal;
pub use room_codes::RandomRoomCodes;
pub use slate::DailySlateCache;
pub use store::{ConfiguredSessionStore, CsvSessionStore, InMemorySessionStore};
