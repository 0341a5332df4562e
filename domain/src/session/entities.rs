//! Session domain entities

use super::participant::ParticipantId;
use super::room::RoomCode;
use super::step::Step;
use crate::core::error::DomainError;
use crate::quorum::{Choices, Vote};
use serde::{Deserialize, Serialize};

/// One participant's persisted progress (Entity)
///
/// Keyed by [`ParticipantId`]; a store holds at most one per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub participant: ParticipantId,
    pub step: Step,
    pub room: Option<RoomCode>,
    pub choices: Choices,
}

impl SessionRecord {
    /// Fresh record: room pending, no room, nothing voted
    pub fn fresh(participant: ParticipantId) -> Self {
        Self {
            participant,
            step: Step::RoomPending,
            room: None,
            choices: Choices::new(),
        }
    }

    pub fn with_room(mut self, room: RoomCode) -> Self {
        self.room = Some(room);
        self
    }

    pub fn is_in_room(&self, room: &RoomCode) -> bool {
        self.room.as_ref() == Some(room)
    }

    /// Apply one state change
    ///
    /// On error the record is left untouched.
    pub fn apply(&mut self, mutation: &SessionMutation) -> Result<(), DomainError> {
        match mutation {
            SessionMutation::AssignRoom(room) => {
                if let Some(current) = &self.room
                    && current != room
                {
                    return Err(DomainError::RoomAlreadyAssigned {
                        current: current.to_string(),
                        requested: room.to_string(),
                    });
                }
                self.room = Some(room.clone());
            }
            SessionMutation::AdvanceTo(step) => {
                self.step = *step;
            }
            SessionMutation::CastVote { candidate, vote } => {
                self.choices.set(*candidate, *vote)?;
                self.step = self.step.after_vote(*candidate);
            }
        }
        Ok(())
    }
}

/// A single keyed change to a [`SessionRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMutation {
    /// Put the participant in a room (rooms never change until reset)
    AssignRoom(RoomCode),
    /// Move to another step
    AdvanceTo(Step),
    /// Record a vote on a 1-indexed candidate and move past it
    CastVote { candidate: usize, vote: Vote },
}

impl std::fmt::Display for SessionMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMutation::AssignRoom(room) => write!(f, "assign room {}", room),
            SessionMutation::AdvanceTo(step) => write!(f, "advance to {}", step),
            SessionMutation::CastVote { candidate, vote } => {
                write!(f, "{} candidate {}", vote, candidate)
            }
        }
    }
}
