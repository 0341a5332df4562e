//! Handle event use case
//!
//! Orchestrates one inbound event end to end:
//!
//! ```text
//! load record ─▶ classify(step, token) ─▶ execute (if actionable)
//!                                              │
//!            EventView ◀─ slate / consensus ◀──┘
//! ```
//!
//! The returned [`EventView`] carries everything a presenter needs to render
//! the reply; nothing in it requires another store read.

use crate::config::BehaviorConfig;
use crate::ports::event_journal::{EventJournal, JournalEntry, NoEventJournal};
use crate::ports::room_codes::RoomCodeGenerator;
use crate::ports::session_store::{SessionStore, StoreError};
use crate::ports::slate_source::SlateSource;
use crate::use_cases::current_slate::CurrentSlate;
use crate::use_cases::execute_action::{ActionExecutor, ActionOutcome};
use crate::use_cases::room_results::{RoomResults, RoomResultsUseCase};
use pickflick_domain::{
    Classification, Context, Movie, ParticipantId, SessionRecord, classify,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while handling an event
#[derive(Error, Debug)]
pub enum HandleEventError {
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the HandleEvent use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleEventInput {
    pub participant: ParticipantId,
    /// Message text or button data
    pub token: String,
}

impl HandleEventInput {
    pub fn new(participant: impl Into<ParticipantId>, token: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            token: token.into(),
        }
    }
}

/// The candidate a participant is currently voting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateView {
    /// 1-indexed position on the slate
    pub number: usize,
    pub movie: Movie,
}

/// State after handling an event, ready for rendering
#[derive(Debug, Clone)]
pub struct EventView {
    pub participant: ParticipantId,
    pub token: String,
    pub classification: Classification,
    pub outcome: ActionOutcome,
    /// Record after the event, if the participant has one
    pub record: Option<SessionRecord>,
    /// Set for `start-choice`, `like` and `discard` while voting continues
    pub candidate: Option<CandidateView>,
    /// Set for `show-result` when the participant is in a room
    pub results: Option<RoomResults>,
    /// Whether a corrupt record was reinitialized while handling the event
    pub recovered: bool,
}

impl EventView {
    pub fn context(&self) -> Context {
        self.classification.context
    }
}

/// Use case for handling one inbound event
pub struct HandleEventUseCase<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    store: Arc<S>,
    slate: Arc<CurrentSlate<L>>,
    executor: ActionExecutor<S, L, R>,
    results: RoomResultsUseCase<S>,
    journal: Arc<dyn EventJournal>,
}

impl<S, L, R> HandleEventUseCase<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    pub fn new(store: Arc<S>, slate_source: Arc<L>, room_codes: Arc<R>) -> Self {
        let slate = Arc::new(CurrentSlate::new(slate_source));
        Self {
            executor: ActionExecutor::new(store.clone(), slate.clone(), room_codes),
            results: RoomResultsUseCase::new(store.clone()),
            store,
            slate,
            journal: Arc::new(NoEventJournal),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.executor = self.executor.with_config(config);
        self
    }

    pub fn with_journal(mut self, journal: Arc<dyn EventJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Handle one event
    pub async fn execute(&self, input: HandleEventInput) -> Result<EventView, HandleEventError> {
        let participant = input.participant;
        let (record, mut recovered) = self.load_record(participant).await?;
        let step = record.as_ref().map(|r| r.step);

        let classification = classify(step.as_ref(), &input.token);
        debug!(
            "Participant {} step {:?} token {:?} -> {} (actionable: {})",
            participant,
            step.map(|s| s.to_string()),
            input.token,
            classification.context,
            classification.actionable
        );

        let outcome = if classification.actionable {
            self.executor
                .execute(participant, classification.context, &input.token, step)
                .await?
        } else {
            ActionOutcome::Unchanged
        };

        let (record, recovered_after) = self.load_record(participant).await?;
        recovered |= recovered_after;

        let candidate = match classification.context {
            Context::StartChoice | Context::Like | Context::Discard => {
                self.candidate_for(record.as_ref()).await
            }
            _ => None,
        };

        let results = match (classification.context, record.as_ref()) {
            (Context::ShowResult, Some(SessionRecord { room: Some(room), .. })) => {
                let slate = self.slate.get().await;
                Some(self.results.execute(room, &slate).await?)
            }
            _ => None,
        };

        self.journal.record(JournalEntry::new(
            "event_handled",
            json!({
                "participant": participant.get(),
                "token": input.token,
                "context": classification.context.as_str(),
                "actionable": classification.actionable,
                "outcome": format!("{:?}", outcome),
                "step": record.as_ref().map(|r| r.step.to_string()),
                "room": record.as_ref().and_then(|r| r.room.as_ref()).map(|r| r.to_string()),
            }),
        ));

        Ok(EventView {
            participant,
            token: input.token,
            classification,
            outcome,
            record,
            candidate,
            results,
            recovered,
        })
    }

    /// Close the underlying store
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        info!("Closing session store");
        self.store.close().await
    }

    /// Read a participant's record, reinitializing it if it is corrupt
    async fn load_record(
        &self,
        participant: ParticipantId,
    ) -> Result<(Option<SessionRecord>, bool), StoreError> {
        match self.store.get(participant).await {
            Ok(record) => Ok((record, false)),
            Err(StoreError::CorruptState { reason, .. }) => {
                warn!(
                    "Corrupt session for {} ({}), reinitializing",
                    participant, reason
                );
                self.journal.record(JournalEntry::new(
                    "state_recovered",
                    json!({ "participant": participant.get(), "reason": reason }),
                ));
                let record = self.store.reset(participant).await?;
                Ok((Some(record), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn candidate_for(&self, record: Option<&SessionRecord>) -> Option<CandidateView> {
        let number = record?.step.candidate()?;
        let slate = self.slate.get().await;
        let movie = slate.candidate(number)?.clone();
        Some(CandidateView { number, movie })
    }
}
