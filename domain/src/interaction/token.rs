//! Vote button tokens (`like-<n>` / `discard-<n>`)

use crate::SLATE_SIZE;
use crate::core::error::DomainError;
use crate::quorum::Vote;

/// A parsed vote button token
///
/// ```
/// use pickflick_domain::{Vote, VoteToken};
///
/// let token: VoteToken = "discard-4".parse().unwrap();
/// assert_eq!(token.vote, Vote::Discard);
/// assert_eq!(token.candidate, 4);
/// assert_eq!(VoteToken::like(7).to_string(), "like-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteToken {
    pub vote: Vote,
    /// 1-indexed candidate
    pub candidate: usize,
}

impl VoteToken {
    pub fn like(candidate: usize) -> Self {
        Self {
            vote: Vote::Like,
            candidate,
        }
    }

    pub fn discard(candidate: usize) -> Self {
        Self {
            vote: Vote::Discard,
            candidate,
        }
    }
}

impl std::fmt::Display for VoteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.vote.is_like() { "like" } else { "discard" };
        write!(f, "{}-{}", kind, self.candidate)
    }
}

impl std::str::FromStr for VoteToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidVoteToken(s.to_string());
        let (kind, index) = s.split_once('-').ok_or_else(invalid)?;
        let vote = match kind {
            "like" => Vote::Like,
            "discard" => Vote::Discard,
            _ => return Err(invalid()),
        };
        let candidate: usize = index.parse().map_err(|_| invalid())?;
        if !(1..=SLATE_SIZE).contains(&candidate) {
            return Err(DomainError::CandidateOutOfRange(candidate));
        }
        Ok(Self { vote, candidate })
    }
}
