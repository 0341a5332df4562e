//! Logging infrastructure: structured event journal.
//!
//! Provides [`JsonlEventJournal`], a JSONL file writer that implements
//! the [`EventJournal`](pickflick_application::EventJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlEventJournal;
