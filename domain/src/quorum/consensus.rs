//! Room consensus
//!
//! Merges the vote vectors of everyone in a room. A candidate survives only
//! if every participant liked it; a single discard vetoes it.

use super::choices::Choices;
use super::vote::Vote;
use crate::SLATE_SIZE;
use serde::{Deserialize, Serialize};

/// Merged status of one candidate across a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    /// Every participant liked it
    Agreed,
    /// At least one participant discarded it
    Vetoed,
    /// Nobody discarded it, but someone has not voted yet
    Pending,
}

impl CandidateStatus {
    /// Merge one cross-section (the votes of every participant for one candidate)
    pub fn from_cross_section(votes: impl IntoIterator<Item = Vote>) -> Self {
        let mut any_unset = false;
        let mut any_vote = false;
        for vote in votes {
            any_vote = true;
            match vote {
                Vote::Discard => return CandidateStatus::Vetoed,
                Vote::Unset => any_unset = true,
                Vote::Like => {}
            }
        }
        if any_unset || !any_vote {
            CandidateStatus::Pending
        } else {
            CandidateStatus::Agreed
        }
    }

    pub fn is_agreed(&self) -> bool {
        matches!(self, CandidateStatus::Agreed)
    }
}

/// Consensus of one room
///
/// # Example
///
/// ```
/// use pickflick_domain::{Choices, RoomConsensus, Vote};
///
/// let mut alice = Choices::new();
/// alice.set(1, Vote::Like).unwrap();
/// alice.set(2, Vote::Like).unwrap();
/// let mut bob = Choices::new();
/// bob.set(1, Vote::Discard).unwrap();
/// bob.set(2, Vote::Like).unwrap();
///
/// let consensus = RoomConsensus::merge(&[alice, bob]);
/// assert_eq!(consensus.agreed(), vec![1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConsensus {
    /// Number of participants whose votes were merged
    pub participants: usize,
    /// Status per candidate, in slate order
    pub statuses: [CandidateStatus; SLATE_SIZE],
}

impl RoomConsensus {
    /// Consensus of a room with no participants
    pub fn empty() -> Self {
        Self {
            participants: 0,
            statuses: [CandidateStatus::Pending; SLATE_SIZE],
        }
    }

    /// Merge every participant's vector
    pub fn merge(choices: &[Choices]) -> Self {
        if choices.is_empty() {
            return Self::empty();
        }

        let statuses = std::array::from_fn(|i| {
            CandidateStatus::from_cross_section(choices.iter().map(|c| c.slot(i)))
        });

        Self {
            participants: choices.len(),
            statuses,
        }
    }

    /// 0-indexed slots every participant liked, in slate order
    pub fn agreed(&self) -> Vec<usize> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_agreed())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_agreement(&self) -> bool {
        self.statuses.iter().any(CandidateStatus::is_agreed)
    }

    /// Number of candidates still waiting on somebody's vote
    pub fn pending_count(&self) -> usize {
        if self.participants == 0 {
            return 0;
        }
        self.statuses
            .iter()
            .filter(|s| matches!(s, CandidateStatus::Pending))
            .count()
    }
}
