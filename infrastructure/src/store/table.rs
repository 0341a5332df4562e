//! Indexed in-memory session table
//!
//! Rows are keyed by participant and carry an insertion sequence number; a
//! secondary index maps each room to its members in sequence order. The
//! table itself does no locking: stores wrap it in a single mutex.

use super::row::{COLUMNS, StoredRow};
use pickflick_application::StoreError;
use pickflick_domain::{ParticipantId, RoomCode, SessionMutation, SessionRecord};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    row: StoredRow,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionTable {
    next_seq: u64,
    entries: HashMap<ParticipantId, Entry>,
    rooms: HashMap<RoomCode, BTreeMap<u64, ParticipantId>>,
}

impl SessionTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a row read from disk
    ///
    /// When a participant appears twice the first row wins, matching what a
    /// front-to-back scan of the file would find.
    pub(crate) fn insert_loaded(&mut self, participant: ParticipantId, row: StoredRow) -> bool {
        if self.entries.contains_key(&participant) {
            debug!("Skipping duplicate row for participant {}", participant);
            return false;
        }
        self.insert_new(participant, row);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError> {
        match self.entries.get(&participant) {
            None => Ok(None),
            Some(Entry {
                row: StoredRow::Valid(record),
                ..
            }) => Ok(Some(record.clone())),
            Some(Entry {
                row: StoredRow::Corrupt { reason, .. },
                ..
            }) => Err(StoreError::CorruptState {
                participant,
                reason: reason.clone(),
            }),
        }
    }

    /// Readable records in a room, in insertion order
    pub(crate) fn find_by_room(&self, room: &RoomCode) -> Vec<SessionRecord> {
        let Some(members) = self.rooms.get(room) else {
            return Vec::new();
        };
        members
            .values()
            .filter_map(|participant| match self.entries.get(participant) {
                Some(Entry {
                    row: StoredRow::Valid(record),
                    ..
                }) => Some(record.clone()),
                Some(Entry {
                    row: StoredRow::Corrupt { reason, .. },
                    ..
                }) => {
                    warn!(
                        "Skipping corrupt record of participant {} in room {}: {}",
                        participant, room, reason
                    );
                    None
                }
                None => None,
            })
            .collect()
    }

    /// Replace a participant's row; the record moves to the end of the table
    pub(crate) fn upsert(&mut self, record: SessionRecord) {
        let participant = record.participant;
        self.remove(participant);
        self.insert_new(participant, StoredRow::Valid(record));
    }

    /// Upsert a record unless another row already holds its room
    pub(crate) fn claim_room(&mut self, record: SessionRecord) -> bool {
        if let Some(room) = &record.room
            && self.rooms.get(room).is_some_and(|members| !members.is_empty())
        {
            debug!("Room {} is already held", room);
            return false;
        }
        self.upsert(record);
        true
    }

    /// Apply a mutation in place, keeping the row's position
    pub(crate) fn update(
        &mut self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError> {
        let Some(current) = self.get(participant)? else {
            return Ok(None);
        };
        let mut next = current.clone();
        next.apply(mutation)?;

        let Some(entry) = self.entries.get_mut(&participant) else {
            return Ok(None);
        };
        let seq = entry.seq;
        entry.row = StoredRow::Valid(next.clone());

        if current.room != next.room {
            if let Some(old) = &current.room {
                self.unindex(old, seq);
            }
            if let Some(new) = &next.room {
                self.rooms
                    .entry(new.clone())
                    .or_default()
                    .insert(seq, participant);
            }
        }
        Ok(Some(next))
    }

    /// Rows in insertion order, ready to be written out
    pub(crate) fn rows(&self) -> Result<Vec<[String; COLUMNS]>, StoreError> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.iter().map(|entry| entry.row.to_fields()).collect()
    }

    fn insert_new(&mut self, participant: ParticipantId, row: StoredRow) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(room) = row.room() {
            self.rooms
                .entry(room.clone())
                .or_default()
                .insert(seq, participant);
        }
        self.entries.insert(participant, Entry { seq, row });
    }

    fn remove(&mut self, participant: ParticipantId) {
        if let Some(entry) = self.entries.remove(&participant)
            && let Some(room) = entry.row.room()
        {
            self.unindex(room, entry.seq);
        }
    }

    fn unindex(&mut self, room: &RoomCode, seq: u64) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&seq);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}
