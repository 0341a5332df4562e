//! Room results use case
//!
//! Runs the consensus merge over everyone in a room.

use crate::ports::session_store::{SessionStore, StoreError};
use pickflick_domain::{Movie, RoomCode, RoomConsensus, Slate};
use std::sync::Arc;
use tracing::debug;

/// Consensus of a room plus the movies it picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomResults {
    pub room: RoomCode,
    pub consensus: RoomConsensus,
    /// Agreed movies in slate order
    pub picks: Vec<Movie>,
}

impl RoomResults {
    pub fn has_picks(&self) -> bool {
        !self.picks.is_empty()
    }
}

/// Use case for computing a room's shared choice
pub struct RoomResultsUseCase<S: SessionStore + 'static> {
    store: Arc<S>,
}

impl<S: SessionStore + 'static> RoomResultsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, room: &RoomCode, slate: &Slate) -> Result<RoomResults, StoreError> {
        let records = self.store.find_by_room(room).await?;
        let choices: Vec<_> = records.iter().map(|r| r.choices).collect();
        let consensus = RoomConsensus::merge(&choices);

        debug!(
            "Room {}: {} participants, {} agreed, {} pending",
            room,
            consensus.participants,
            consensus.agreed().len(),
            consensus.pending_count()
        );

        let picks = slate.picks(&consensus).into_iter().cloned().collect();
        Ok(RoomResults {
            room: room.clone(),
            consensus,
            picks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockSessionStore, MockSlateSource};
    use crate::ports::slate_source::SlateSource;
    use pickflick_domain::{ParticipantId, SessionRecord, Vote};

    fn record(id: i64, room: &str, likes: &[usize], discards: &[usize]) -> SessionRecord {
        let mut r = SessionRecord::fresh(ParticipantId::new(id)).with_room(RoomCode::new(room).unwrap());
        for c in likes {
            r.choices.set(*c, Vote::Like).unwrap();
        }
        for c in discards {
            r.choices.set(*c, Vote::Discard).unwrap();
        }
        r
    }

    async fn slate() -> Slate {
        MockSlateSource::with_movies(10).load_current().await.unwrap()
    }

    #[tokio::test]
    async fn test_veto_merge() {
        let store = Arc::new(MockSessionStore::new());
        store.upsert(record(1, "abc", &[1, 2], &[3])).await.unwrap();
        store.upsert(record(2, "abc", &[2, 3], &[1])).await.unwrap();

        let results = RoomResultsUseCase::new(store)
            .execute(&RoomCode::new("abc").unwrap(), &slate().await)
            .await
            .unwrap();

        assert_eq!(results.consensus.agreed(), vec![1]);
        let titles: Vec<_> = results.picks.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Movie 2"]);
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let store = Arc::new(MockSessionStore::new());
        store.upsert(record(1, "abc", &[1, 2, 3], &[])).await.unwrap();
        store.upsert(record(2, "abc", &[1, 2, 3], &[])).await.unwrap();
        store.upsert(record(3, "xyz", &[1, 2, 3], &[])).await.unwrap();
        store.upsert(record(4, "xyz", &[], &[1, 2, 3])).await.unwrap();

        let use_case = RoomResultsUseCase::new(store);
        let slate = slate().await;
        let abc = use_case
            .execute(&RoomCode::new("abc").unwrap(), &slate)
            .await
            .unwrap();
        let xyz = use_case
            .execute(&RoomCode::new("xyz").unwrap(), &slate)
            .await
            .unwrap();

        assert_eq!(abc.consensus.agreed(), vec![0, 1, 2]);
        assert!(!xyz.has_picks());
    }

    #[tokio::test]
    async fn test_empty_room() {
        let store = Arc::new(MockSessionStore::new());
        let results = RoomResultsUseCase::new(store)
            .execute(&RoomCode::new("abc").unwrap(), &slate().await)
            .await
            .unwrap();
        assert_eq!(results.consensus.participants, 0);
        assert!(!results.has_picks());
    }
}
