//! JSONL file writer for handled events.
//!
//! Each [`JournalEntry`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use pickflick_application::{EventJournal, JournalEntry};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Event journal that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventJournal {
    /// Open the journal at the given path, appending to what is there.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event journal directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event journal {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventJournal for JsonlEventJournal {
    fn record(&self, entry: JournalEntry) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = entry.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(entry.entry_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": entry.entry_type,
                "timestamp": timestamp,
                "data": entry.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_journal_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let journal = JsonlEventJournal::open(&path).unwrap();

        journal.record(JournalEntry::new(
            "event_handled",
            serde_json::json!({
                "participant": 7,
                "token": "like-3",
                "context": "like",
                "actionable": true
            }),
        ));
        drop(journal);

        let lines = lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["type"], "event_handled");
        assert_eq!(lines[0]["participant"], 7);
        assert_eq!(lines[0]["context"], "like");
        assert!(lines[0].get("timestamp").is_some());
    }

    #[test]
    fn test_journal_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");

        for token in ["create-room", "start-choice"] {
            let journal = JsonlEventJournal::open(&path).unwrap();
            journal.record(JournalEntry::new(
                "event_handled",
                serde_json::json!({ "token": token }),
            ));
        }

        let tokens: Vec<_> = lines(&path)
            .iter()
            .map(|v| v["token"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(tokens, vec!["create-room", "start-choice"]);
    }

    #[test]
    fn test_journal_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let journal = JsonlEventJournal::open(&path).unwrap();

        journal.record(JournalEntry::new("note", serde_json::json!("restarted")));
        drop(journal);

        let lines = lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "restarted");
    }
}
