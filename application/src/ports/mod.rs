//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_journal;
pub mod room_codes;
pub mod session_store;
pub mod slate_source;
