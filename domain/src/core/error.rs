//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid step token: {0:?}")]
    InvalidStep(String),

    #[error("Invalid room code: {0:?}")]
    InvalidRoomCode(String),

    #[error("Candidate {0} is outside the slate")]
    CandidateOutOfRange(usize),

    #[error("Invalid vote token: {0:?}")]
    InvalidVoteToken(String),

    #[error("Invalid vote vector: {0}")]
    InvalidChoices(String),

    #[error("Slate has {0} movies, at most {max} are supported", max = crate::SLATE_SIZE)]
    SlateTooLarge(usize),

    #[error("Participant already belongs to room {current}, cannot join {requested}")]
    RoomAlreadyAssigned { current: String, requested: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_out_of_range_display() {
        let error = DomainError::CandidateOutOfRange(11);
        assert_eq!(error.to_string(), "Candidate 11 is outside the slate");
    }
}
