//! Application layer for pickflick
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    event_journal::{EventJournal, JournalEntry, NoEventJournal},
    room_codes::RoomCodeGenerator,
    session_store::{SessionStore, StoreError},
    slate_source::{SlateError, SlateSource},
};
pub use use_cases::current_slate::CurrentSlate;
pub use use_cases::execute_action::{ActionExecutor, ActionOutcome};
pub use use_cases::handle_event::{
    CandidateView, EventView, HandleEventError, HandleEventInput, HandleEventUseCase,
};
pub use use_cases::room_results::{RoomResults, RoomResultsUseCase};
