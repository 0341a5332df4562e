//! Flow step of a participant

use crate::SLATE_SIZE;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Where a participant is in the flow
///
/// Persisted as the tokens `"1"`, `"2-<n>"` and `"3"`.
///
/// ```
/// use pickflick_domain::Step;
///
/// let step: Step = "2-4".parse().unwrap();
/// assert_eq!(step, Step::Voting(4));
/// assert_eq!(step.after_vote(4), Step::Voting(5));
/// assert_eq!(Step::Voting(10).after_vote(10), Step::Done);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Step {
    /// Room assigned or awaited, voting not started
    RoomPending,
    /// Voting on candidate `n` (1-indexed)
    Voting(usize),
    /// Voting complete, results available
    Done,
}

impl Step {
    /// Step shown when voting starts
    pub fn first_candidate() -> Self {
        Step::Voting(1)
    }

    /// Step that follows a vote on `candidate`
    pub fn after_vote(&self, candidate: usize) -> Self {
        if candidate >= SLATE_SIZE {
            Step::Done
        } else {
            Step::Voting(candidate + 1)
        }
    }

    /// Candidate currently being voted on, if any
    pub fn candidate(&self) -> Option<usize> {
        match self {
            Step::Voting(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is the vote on the final candidate of the slate
    pub fn is_last_candidate(&self) -> bool {
        matches!(self, Step::Voting(n) if *n == SLATE_SIZE)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::RoomPending => write!(f, "1"),
            Step::Voting(n) => write!(f, "2-{}", n),
            Step::Done => write!(f, "3"),
        }
    }
}

impl std::str::FromStr for Step {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Step::RoomPending),
            "3" => Ok(Step::Done),
            _ => {
                let n: usize = s
                    .strip_prefix("2-")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| DomainError::InvalidStep(s.to_string()))?;
                if (1..=SLATE_SIZE).contains(&n) {
                    Ok(Step::Voting(n))
                } else {
                    Err(DomainError::InvalidStep(s.to_string()))
                }
            }
        }
    }
}

impl TryFrom<String> for Step {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Step> for String {
    fn from(step: Step) -> Self {
        step.to_string()
    }
}
