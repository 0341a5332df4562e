//! Action executor
//!
//! Applies the state change of an actionable context to the session store.

use crate::config::BehaviorConfig;
use crate::ports::room_codes::RoomCodeGenerator;
use crate::ports::session_store::{SessionStore, StoreError};
use crate::ports::slate_source::SlateSource;
use crate::use_cases::current_slate::CurrentSlate;
use pickflick_domain::{
    Context, ParticipantId, RoomCode, SessionMutation, SessionRecord, Step, Vote, VoteToken,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What an executed action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing to change for this context
    Unchanged,
    /// The participant's record was reinitialized
    Reset,
    RoomCreated(RoomCode),
    /// No free room code was found; the participant was reset without a room
    RoomUnavailable,
    RoomJoined(RoomCode),
    /// The participant already holds another room and stays in it
    AlreadyInRoom(RoomCode),
    RoomNotFound,
    SlateRefreshed(usize),
    SlateUnavailable(String),
    Advanced(Step),
    VoteRecorded {
        candidate: usize,
        vote: Vote,
        step: Step,
    },
    /// The participant has no session record to change
    NoSession,
    /// The event could not be applied (bad token, room already assigned, ...)
    Ignored(String),
}

/// Executes the transitions of the session state machine
pub struct ActionExecutor<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    store: Arc<S>,
    slate: Arc<CurrentSlate<L>>,
    room_codes: Arc<R>,
    config: BehaviorConfig,
}

impl<S, L, R> ActionExecutor<S, L, R>
where
    S: SessionStore + 'static,
    L: SlateSource + 'static,
    R: RoomCodeGenerator + 'static,
{
    pub fn new(store: Arc<S>, slate: Arc<CurrentSlate<L>>, room_codes: Arc<R>) -> Self {
        Self {
            store,
            slate,
            room_codes,
            config: BehaviorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute the transition for `context`
    ///
    /// `step` is the participant's step before the event.
    pub async fn execute(
        &self,
        participant: ParticipantId,
        context: Context,
        token: &str,
        step: Option<Step>,
    ) -> Result<ActionOutcome, StoreError> {
        debug!("Executing {} for {}", context, participant);

        match context {
            Context::CreateRoom => self.create_room(participant).await,
            Context::EnterRoom | Context::End => {
                self.store.reset(participant).await?;
                Ok(ActionOutcome::Reset)
            }
            Context::JoinRoom => self.join_room(participant, token).await,
            Context::RoomFound => Ok(match self.slate.refresh().await {
                Ok(len) => ActionOutcome::SlateRefreshed(len),
                Err(e) => {
                    warn!("Could not refresh slate: {}", e);
                    ActionOutcome::SlateUnavailable(e.to_string())
                }
            }),
            Context::StartChoice => {
                self.apply(participant, SessionMutation::AdvanceTo(Step::first_candidate()))
                    .await
            }
            Context::Like | Context::Discard => match token.parse::<VoteToken>() {
                Ok(vote) => self.cast_vote(participant, vote).await,
                Err(e) => {
                    debug!("Ignoring vote token {:?}: {}", token, e);
                    Ok(ActionOutcome::Ignored(e.to_string()))
                }
            },
            Context::ChoiceMade => {
                // A vote on the last candidate also completes the round
                match token.parse::<VoteToken>() {
                    Ok(vote) if step == Some(Step::Voting(vote.candidate)) => {
                        self.cast_vote(participant, vote).await
                    }
                    _ => {
                        self.apply(participant, SessionMutation::AdvanceTo(Step::Done))
                            .await
                    }
                }
            }
            Context::Exit
            | Context::Start
            | Context::About
            | Context::ShowResult
            | Context::Unrecognized => Ok(ActionOutcome::Unchanged),
        }
    }

    async fn create_room(&self, participant: ParticipantId) -> Result<ActionOutcome, StoreError> {
        for attempt in 1..=self.config.room_code_attempts {
            let room = self.room_codes.generate();
            let record = SessionRecord::fresh(participant).with_room(room.clone());
            if !self.store.claim_room(record).await? {
                debug!("Room code {} taken (attempt {})", room, attempt);
                continue;
            }
            info!("Participant {} created room {}", participant, room);
            return Ok(ActionOutcome::RoomCreated(room));
        }

        warn!(
            "No free room code after {} attempts",
            self.config.room_code_attempts
        );
        self.store.reset(participant).await?;
        Ok(ActionOutcome::RoomUnavailable)
    }

    async fn join_room(
        &self,
        participant: ParticipantId,
        token: &str,
    ) -> Result<ActionOutcome, StoreError> {
        let Ok(room) = RoomCode::new(token) else {
            return Ok(ActionOutcome::RoomNotFound);
        };
        if !self.store.room_exists(&room).await? {
            debug!("No live room {}", room);
            return Ok(ActionOutcome::RoomNotFound);
        }

        let outcome = self
            .apply(participant, SessionMutation::AssignRoom(room.clone()))
            .await?;
        Ok(match outcome {
            ActionOutcome::Advanced(_) => {
                info!("Participant {} joined room {}", participant, room);
                ActionOutcome::RoomJoined(room)
            }
            ActionOutcome::Ignored(reason) => {
                match self.store.get(participant).await?.and_then(|r| r.room) {
                    Some(current) => ActionOutcome::AlreadyInRoom(current),
                    None => ActionOutcome::Ignored(reason),
                }
            }
            other => other,
        })
    }

    async fn cast_vote(
        &self,
        participant: ParticipantId,
        vote: VoteToken,
    ) -> Result<ActionOutcome, StoreError> {
        let outcome = self
            .apply(
                participant,
                SessionMutation::CastVote {
                    candidate: vote.candidate,
                    vote: vote.vote,
                },
            )
            .await?;
        Ok(match outcome {
            ActionOutcome::Advanced(step) => ActionOutcome::VoteRecorded {
                candidate: vote.candidate,
                vote: vote.vote,
                step,
            },
            other => other,
        })
    }

    /// Apply one mutation, mapping rejections and missing records to outcomes
    async fn apply(
        &self,
        participant: ParticipantId,
        mutation: SessionMutation,
    ) -> Result<ActionOutcome, StoreError> {
        match self.store.update(participant, &mutation).await {
            Ok(Some(record)) => Ok(ActionOutcome::Advanced(record.step)),
            Ok(None) => {
                debug!("No session for {}, cannot {}", participant, mutation);
                Ok(ActionOutcome::NoSession)
            }
            Err(StoreError::Rejected(e)) => {
                warn!("Rejected {} for {}: {}", mutation, participant, e);
                Ok(ActionOutcome::Ignored(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
