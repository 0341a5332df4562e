//! Vote primitive for room consensus

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One participant's vote on one candidate
///
/// Persisted as `1` (like), `0` (discard) or `null` (not voted yet).
/// Older tables wrote `0` for both "discarded" and "not voted"; those load
/// as [`Vote::Discard`], which merges identically.
///
/// # Example
///
/// ```
/// use pickflick_domain::Vote;
///
/// assert_eq!(serde_json::to_string(&Vote::Like).unwrap(), "1");
/// assert_eq!(serde_json::to_string(&Vote::Unset).unwrap(), "null");
/// assert_eq!(serde_json::from_str::<Vote>("0").unwrap(), Vote::Discard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<u8>", into = "Option<u8>")]
pub enum Vote {
    #[default]
    Unset,
    Like,
    Discard,
}

impl Vote {
    pub fn is_like(&self) -> bool {
        matches!(self, Vote::Like)
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Vote::Discard)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Vote::Unset)
    }
}

impl TryFrom<Option<u8>> for Vote {
    type Error = DomainError;

    fn try_from(value: Option<u8>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(Vote::Unset),
            Some(0) => Ok(Vote::Discard),
            Some(1) => Ok(Vote::Like),
            Some(other) => Err(DomainError::InvalidChoices(format!(
                "vote value {} is not 0, 1 or null",
                other
            ))),
        }
    }
}

impl From<Vote> for Option<u8> {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Unset => None,
            Vote::Discard => Some(0),
            Vote::Like => Some(1),
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vote::Unset => write!(f, "unset"),
            Vote::Like => write!(f, "like"),
            Vote::Discard => write!(f, "discard"),
        }
    }
}
