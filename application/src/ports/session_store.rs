//! Session store port
//!
//! Defines the interface for persisting participants' session records.

use async_trait::async_trait;
use pickflick_domain::{DomainError, ParticipantId, RoomCode, SessionMutation, SessionRecord};
use thiserror::Error;

/// Errors that can occur during session store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session record of participant {participant} is corrupt: {reason}")]
    CorruptState {
        participant: ParticipantId,
        reason: String,
    },

    #[error("Mutation rejected: {0}")]
    Rejected(#[from] DomainError),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store encoding error: {0}")]
    Encoding(String),

    #[error("Store is closed")]
    Closed,
}

impl StoreError {
    /// Whether a participant's persisted record could not be decoded
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, StoreError::CorruptState { .. })
    }
}

/// Store of session records, one per participant
///
/// Implementations serialize writers: [`update`](SessionStore::update) reads,
/// applies and writes back inside one critical section so concurrent events
/// from different participants never overwrite each other's records.
/// Absence is a normal outcome, not an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record of a participant
    async fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError>;

    /// Every readable record in a room, in insertion order
    async fn find_by_room(&self, room: &RoomCode) -> Result<Vec<SessionRecord>, StoreError>;

    /// Insert the record, or replace the one with the same participant
    async fn upsert(&self, record: SessionRecord) -> Result<(), StoreError>;

    /// Upsert a record that opens a new room, unless the room is already held
    ///
    /// The check and the write happen in one critical section, so two
    /// participants drawing the same code cannot both open it. Returns
    /// `false` without writing anything when the code is taken.
    async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError>;

    /// Atomically apply a mutation to a participant's record
    ///
    /// Returns the updated record, or `None` when the participant has none.
    async fn update(
        &self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError>;

    /// Close the store, flushing anything pending
    async fn close(&self) -> Result<(), StoreError>;

    /// Whether anybody is in the room
    async fn room_exists(&self, room: &RoomCode) -> Result<bool, StoreError> {
        Ok(!self.find_by_room(room).await?.is_empty())
    }

    /// Reinitialize a participant: room pending, no room, nothing voted
    async fn reset(&self, participant: ParticipantId) -> Result<SessionRecord, StoreError> {
        let record = SessionRecord::fresh(participant);
        self.upsert(record.clone()).await?;
        Ok(record)
    }
}
