//! Port for the structured event journal.
//!
//! Defines the [`EventJournal`] trait for recording every handled inbound
//! event (participant, token, classified context, resulting step) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable transcript of the session flow (JSONL).

use serde_json::Value;

/// A structured journal entry.
///
/// Each entry has a type string and a JSON payload containing
/// entry-specific fields. Adapters add the timestamp.
pub struct JournalEntry {
    /// Entry type identifier (e.g., "event_handled", "state_recovered").
    pub entry_type: &'static str,
    /// JSON payload with entry-specific data.
    pub payload: Value,
}

impl JournalEntry {
    pub fn new(entry_type: &'static str, payload: Value) -> Self {
        Self {
            entry_type,
            payload,
        }
    }
}

/// Port for journaling handled events.
///
/// The `record` method is synchronous and non-fallible so a broken journal
/// never interrupts event handling.
pub trait EventJournal: Send + Sync {
    /// Record a journal entry.
    fn record(&self, entry: JournalEntry);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoEventJournal;

impl EventJournal for NoEventJournal {
    fn record(&self, _entry: JournalEntry) {}
}
