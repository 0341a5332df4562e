//! Process-local session store

use super::table::SessionTable;
use async_trait::async_trait;
use pickflick_application::{SessionStore, StoreError};
use pickflick_domain::{ParticipantId, RoomCode, SessionMutation, SessionRecord};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Session store that keeps the table in memory only
///
/// `close` drops the table; every later call fails with [`StoreError::Closed`].
#[derive(Debug)]
pub struct InMemorySessionStore {
    table: Mutex<Option<SessionTable>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Some(SessionTable::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionTable>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
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
        self.lock()
            .as_mut()
            .ok_or(StoreError::Closed)?
            .upsert(record);
        Ok(())
    }

    async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError> {
        Ok(self
            .lock()
            .as_mut()
            .ok_or(StoreError::Closed)?
            .claim_room(record))
    }

    async fn update(
        &self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError> {
        self.lock()
            .as_mut()
            .ok_or(StoreError::Closed)?
            .update(participant, mutation)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.lock().take();
        Ok(())
    }
}
