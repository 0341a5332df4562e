//! Flat-file session store
//!
//! The table is read once when the store opens. Every mutation rewrites the
//! whole file by writing a temporary file next to it and renaming it over the
//! original, so readers never see a half-written table. Mutations are made
//! on a copy of the table that replaces the live one only once it is on disk.

use super::row::{self, DecodedRow};
use super::table::SessionTable;
use async_trait::async_trait;
use pickflick_application::{SessionStore, StoreError};
use pickflick_domain::{ParticipantId, RoomCode, SessionMutation, SessionRecord};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Session store persisted as a four-column CSV file
#[derive(Debug)]
pub struct CsvSessionStore {
    path: PathBuf,
    table: Mutex<Option<SessionTable>>,
}

impl CsvSessionStore {
    /// Open the table at `path`
    ///
    /// A missing file is an empty table; the file (and its directory) is
    /// created on the first mutation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            load(&path)?
        } else {
            debug!("Session table {} does not exist yet", path.display());
            SessionTable::new()
        };
        info!(
            "Opened session table {} ({} records)",
            path.display(),
            table.len()
        );

        Ok(Self {
            path,
            table: Mutex::new(Some(table)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionTable>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `change` on a copy of the table and swap it in once written
    ///
    /// `change` returns its result and whether the table was modified; an
    /// unmodified table is not rewritten.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut SessionTable) -> Result<(T, bool), StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.lock();
        let table = guard.as_mut().ok_or(StoreError::Closed)?;
        let mut next = table.clone();
        let (value, changed) = change(&mut next)?;
        if changed {
            self.persist(&next)?;
            *table = next;
        }
        Ok(value)
    }

    fn persist(&self, table: &SessionTable) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let tmp = NamedTempFile::new_in(&dir)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp);
        for fields in table.rows()? {
            writer.write_record(&fields).map_err(encoding)?;
        }
        let tmp = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

fn encoding(error: csv::Error) -> StoreError {
    StoreError::Encoding(error.to_string())
}

fn load(path: &Path) -> Result<SessionTable, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(encoding)?;

    let mut table = SessionTable::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable row {} of {}: {}", line + 1, path.display(), e);
                continue;
            }
        };
        match row::decode(record.iter()) {
            DecodedRow::Skip(reason) => {
                debug!("Skipping row {} of {}: {}", line + 1, path.display(), reason);
            }
            DecodedRow::Row(participant, row) => {
                table.insert_loaded(participant, row);
            }
        }
    }
    Ok(table)
}

#[async_trait]
impl SessionStore for CsvSessionStore {
    async fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError> {
        self.lock().as_ref().ok_or(StoreError::Closed)?.get(participant)
    }

    async fn find_by_room(&self, room: &RoomCode) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(self
            .lock()
            .as_ref()
            .ok_or(StoreError::Closed)?
            .find_by_room(room))
    }

    async fn upsert(&self, record: SessionRecord) -> Result<(), StoreError> {
        self.commit(|table| {
            table.upsert(record);
            Ok(((), true))
        })
    }

    async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError> {
        self.commit(|table| {
            let claimed = table.claim_room(record);
            Ok((claimed, claimed))
        })
    }

    async fn update(
        &self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError> {
        self.commit(|table| {
            let updated = table.update(participant, mutation)?;
            let changed = updated.is_some();
            Ok((updated, changed))
        })
    }

    async fn close(&self) -> Result<(), StoreError> {
        if self.lock().take().is_some() {
            debug!("Closed session table {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickflick_domain::{Step, Vote};

    fn room(code: &str) -> RoomCode {
        RoomCode::new(code).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("sessions.csv");
        let store = CsvSessionStore::open(&path).unwrap();

        assert!(store.get(ParticipantId::new(1)).await.unwrap().is_none());
        assert!(!path.exists());

        store.reset(ParticipantId::new(1)).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");

        let store = CsvSessionStore::open(&path).unwrap();
        store
            .upsert(SessionRecord::fresh(ParticipantId::new(1)).with_room(room("abc")))
            .await
            .unwrap();
        store
            .upsert(SessionRecord::fresh(ParticipantId::new(2)).with_room(room("abc")))
            .await
            .unwrap();
        store
            .update(ParticipantId::new(1), &SessionMutation::AdvanceTo(Step::first_candidate()))
            .await
            .unwrap();
        store
            .update(
                ParticipantId::new(1),
                &SessionMutation::CastVote { candidate: 1, vote: Vote::Like },
            )
            .await
            .unwrap();
        store.close().await.unwrap();

        let reopened = CsvSessionStore::open(&path).unwrap();
        let first = reopened.get(ParticipantId::new(1)).await.unwrap().unwrap();
        assert_eq!(first.step, Step::Voting(2));
        assert_eq!(first.choices.get(1), Some(Vote::Like));
        let members: Vec<_> = reopened
            .find_by_room(&room("abc"))
            .await
            .unwrap()
            .iter()
            .map(|r| r.participant.get())
            .collect();
        assert_eq!(members, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        let store = CsvSessionStore::open(&path).unwrap();
        store
            .upsert(SessionRecord::fresh(ParticipantId::new(42)))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "42,1,,\"[null,null,null,null,null,null,null,null,null,null]\"\n"
        );
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped_and_corrupt_rows_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        std::fs::write(
            &path,
            concat!(
                "1,2-2,abc,\"[1,0,0,0,0,0,0,0,0,0]\"\n",
                "short,row\n",
                "nobody,1,,\"[0,0,0,0,0,0,0,0,0,0]\"\n",
                "2,2-1,abc,\"[1,1\"\n",
                "3,3,abc,\"[1,1,1,1,1,1,1,1,1,1]\"\n",
            ),
        )
        .unwrap();

        let store = CsvSessionStore::open(&path).unwrap();
        assert!(store.get(ParticipantId::new(2)).await.unwrap_err().is_corrupt_state());
        let members: Vec<_> = store
            .find_by_room(&room("abc"))
            .await
            .unwrap()
            .iter()
            .map(|r| r.participant.get())
            .collect();
        assert_eq!(members, vec![1, 3]);

        // A rewrite drops malformed rows but keeps the corrupt one verbatim
        store.reset(ParticipantId::new(4)).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("short"));
        assert!(!content.contains("nobody"));
        assert!(content.contains("\"[1,1\""));
    }

    #[tokio::test]
    async fn test_legacy_zero_slots_load_as_discards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        std::fs::write(&path, "5,1,,\"[0,0,0,0,0,0,0,0,0,0]\"\n").unwrap();

        let store = CsvSessionStore::open(&path).unwrap();
        let record = store.get(ParticipantId::new(5)).await.unwrap().unwrap();
        assert!(record.choices.votes().iter().all(Vote::is_discard));
    }

    #[tokio::test]
    async fn test_update_of_absent_participant_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        let store = CsvSessionStore::open(&path).unwrap();

        let result = store
            .update(ParticipantId::new(1), &SessionMutation::AdvanceTo(Step::Done))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_table_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("notadir");
        std::fs::write(&not_a_dir, "").unwrap();
        let store = CsvSessionStore::open(not_a_dir.join("sessions.csv")).unwrap();

        let record = SessionRecord::fresh(ParticipantId::new(1)).with_room(room("abc"));
        assert!(store.upsert(record.clone()).await.is_err());
        assert!(store.claim_room(record).await.is_err());

        assert!(store.get(ParticipantId::new(1)).await.unwrap().is_none());
        assert!(store.find_by_room(&room("abc")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("db");
        let path = db.join("sessions.csv");
        let store = CsvSessionStore::open(&path).unwrap();
        store
            .upsert(SessionRecord::fresh(ParticipantId::new(1)).with_room(room("abc")))
            .await
            .unwrap();

        // Replace the table's directory with a plain file
        std::fs::remove_dir_all(&db).unwrap();
        std::fs::write(&db, "").unwrap();

        let result = store
            .update(ParticipantId::new(1), &SessionMutation::AdvanceTo(Step::first_candidate()))
            .await;
        assert!(result.is_err());
        let record = store.get(ParticipantId::new(1)).await.unwrap().unwrap();
        assert_eq!(record.step, Step::RoomPending);
    }

    #[tokio::test]
    async fn test_claim_room_is_persisted_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.csv");
        let store = CsvSessionStore::open(&path).unwrap();

        let first = SessionRecord::fresh(ParticipantId::new(1)).with_room(room("abc"));
        let second = SessionRecord::fresh(ParticipantId::new(2)).with_room(room("abc"));
        assert!(store.claim_room(first).await.unwrap());
        assert!(!store.claim_room(second).await.unwrap());
        store.close().await.unwrap();

        let reopened = CsvSessionStore::open(&path).unwrap();
        assert!(reopened.get(ParticipantId::new(2)).await.unwrap().is_none());
        let members = reopened.find_by_room(&room("abc")).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].participant, ParticipantId::new(1));
    }
}
