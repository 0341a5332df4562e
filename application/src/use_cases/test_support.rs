//! Mock ports shared by the use case tests

use crate::ports::room_codes::RoomCodeGenerator;
use crate::ports::session_store::{SessionStore, StoreError};
use crate::ports::slate_source::{SlateError, SlateSource};
use async_trait::async_trait;
use pickflick_domain::{
    Movie, ParticipantId, RoomCode, SessionMutation, SessionRecord, Slate,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Vec-backed store; participants listed in `corrupt` fail with `CorruptState`
pub(crate) struct MockSessionStore {
    records: Mutex<Vec<SessionRecord>>,
    corrupt: Mutex<HashSet<ParticipantId>>,
}

impl MockSessionStore {
    pub(crate) fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            corrupt: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn corrupt(&self, participant: ParticipantId) {
        self.corrupt.lock().unwrap().insert(participant);
    }

    fn check(&self, participant: ParticipantId) -> Result<(), StoreError> {
        if self.corrupt.lock().unwrap().contains(&participant) {
            return Err(StoreError::CorruptState {
                participant,
                reason: "mock corruption".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get(&self, participant: ParticipantId) -> Result<Option<SessionRecord>, StoreError> {
        self.check(participant)?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.participant == participant)
            .cloned())
    }

    async fn find_by_room(&self, room: &RoomCode) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_in_room(room))
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: SessionRecord) -> Result<(), StoreError> {
        self.corrupt.lock().unwrap().remove(&record.participant);
        let mut records = self.records.lock().unwrap();
        records.retain(|r| r.participant != record.participant);
        records.push(record);
        Ok(())
    }

    async fn claim_room(&self, record: SessionRecord) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        if let Some(room) = &record.room
            && records.iter().any(|r| r.is_in_room(room))
        {
            return Ok(false);
        }
        self.corrupt.lock().unwrap().remove(&record.participant);
        records.retain(|r| r.participant != record.participant);
        records.push(record);
        Ok(true)
    }

    async fn update(
        &self,
        participant: ParticipantId,
        mutation: &SessionMutation,
    ) -> Result<Option<SessionRecord>, StoreError> {
        self.check(participant)?;
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| r.participant == participant) else {
            return Ok(None);
        };
        let mut next = record.clone();
        next.apply(mutation)?;
        *record = next.clone();
        Ok(Some(next))
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub(crate) struct MockSlateSource {
    slate: Option<Slate>,
}

impl MockSlateSource {
    pub(crate) fn with_movies(n: usize) -> Self {
        let movies = (1..=n)
            .map(|i| {
                Movie::new(format!("Movie {i}"), format!("https://example.org/{i}"))
                    .with_description(format!("Plot {i}"))
                    .with_poster(format!("https://example.org/{i}.jpg"))
            })
            .collect();
        Self {
            slate: Some(Slate::new(movies).unwrap()),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self { slate: None }
    }
}

#[async_trait]
impl SlateSource for MockSlateSource {
    async fn load_current(&self) -> Result<Slate, SlateError> {
        self.slate
            .clone()
            .ok_or_else(|| SlateError::Unavailable("mock".to_string()))
    }
}

/// Hands out the given codes in a cycle
pub(crate) struct FixedRoomCodes {
    codes: Vec<RoomCode>,
    next: AtomicUsize,
}

impl FixedRoomCodes {
    pub(crate) fn new(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| RoomCode::new(*c).unwrap()).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RoomCodeGenerator for FixedRoomCodes {
    fn generate(&self) -> RoomCode {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.codes[i % self.codes.len()].clone()
    }
}
