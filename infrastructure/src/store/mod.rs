//! Session store adapters
//!
//! Both adapters share one [`SessionTable`](table::SessionTable): rows keyed
//! by participant plus a room index, held behind a single mutex so that
//! `update` reads, applies and writes back without interleaving.
//!
//! - [`CsvSessionStore`]: the table mirrored to a flat CSV file
//! - [`InMemorySessionStore`]: the table alone, for tests and throwaway runs

mod csv_store;
mod memory;
mod row;
mod table;

pub use csv_store::CsvSessionStore;
pub use memory::InMemorySessionStore;

use crate::config::{FileStoreConfig, StoreBackend};
use async_trait::async_trait;
use pickflick_application::{SessionStore, StoreError};
use pickflick_domain::{ParticipantId, RoomCode, SessionMutation, SessionRecord};

/// The store selected by `[store] backend`
#[derive(Debug)]
pub enum ConfiguredSessionStore {
    Csv(CsvSessionStore),
    Memory(InMemorySessionStore),
}

impl ConfiguredSessionStore {
    pub fn open(config: &FileStoreConfig) -> Result<Self, StoreError> {
        match config.parse_backend().0 {
            StoreBackend::Csv => Ok(Self::Csv(CsvSessionStore::open(config.parse_path().0)?)),
            StoreBackend::Memory => Ok(Self::Memory(InMemorySessionStore::new())),
        }
    }

    pub fn backend(&self) -> StoreBackend {
        match self {
            Self::Csv(_) => StoreBackend::Csv,
            Self::Memory(_) => StoreBackend::Memory,
        }
    }

    fn inner(&self) -> &dyn SessionStore {
        match self {
            Self::Csv(store) => store,
            Self::Memory(store) => store,
        }
    }
}

#[async_trait]
impl SessionStore for ConfiguredSessionStore {
    async fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError> {
        self.inner().get(participant).await
    }

    async fn find_by_room(&self, room: &RoomCode) -> Result<Vec<SessionRecord>, StoreError> {
        self.inner().find_by_room(room).await
    }

    async fn upsert(&self, record: SessionRecord) -> Result<(), StoreError> {
        self.inner().upsert(record).await
    }

    async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError> {
        self.inner().claim_room(record).await
    }

    async fn update(
        &self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError> {
        self.inner().update(participant, mutation).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.inner().close().await
    }
}
