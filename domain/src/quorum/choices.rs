//! Per-participant vote vector

use super::vote::Vote;
use crate::SLATE_SIZE;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One vote slot per slate candidate, in slate order
///
/// The length is fixed at [`SLATE_SIZE`]; decoding a vector of any other
/// length fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Choices([Vote; SLATE_SIZE]);

impl Choices {
    /// All slots unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from 0-indexed slots
    pub fn from_votes(votes: [Vote; SLATE_SIZE]) -> Self {
        Self(votes)
    }

    /// Vote for a 1-indexed candidate
    pub fn get(&self, candidate: usize) -> Option<Vote> {
        candidate
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
    }

    /// Record a vote for a 1-indexed candidate
    pub fn set(&mut self, candidate: usize, vote: Vote) -> Result<(), DomainError> {
        let slot = candidate
            .checked_sub(1)
            .and_then(|i| self.0.get_mut(i))
            .ok_or(DomainError::CandidateOutOfRange(candidate))?;
        *slot = vote;
        Ok(())
    }

    /// Vote at a 0-indexed slot
    pub fn slot(&self, index: usize) -> Vote {
        self.0[index]
    }

    pub fn votes(&self) -> &[Vote; SLATE_SIZE] {
        &self.0
    }

    /// Serialize as the JSON array stored in the session table
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    /// Decode the JSON array stored in the session table
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let votes: Vec<Vote> = serde_json::from_str(raw)
            .map_err(|e| DomainError::InvalidChoices(format!("{}: {}", raw, e)))?;
        let len = votes.len();
        let votes: [Vote; SLATE_SIZE] = votes.try_into().map_err(|_| {
            DomainError::InvalidChoices(format!("expected {} slots, found {}", SLATE_SIZE, len))
        })?;
        Ok(Self(votes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_choices_are_unset() {
        let choices = Choices::new();
        assert!(choices.votes().iter().all(Vote::is_unset));
        assert_eq!(
            choices.to_json().unwrap(),
            "[null,null,null,null,null,null,null,null,null,null]"
        );
    }

    #[test]
    fn test_set_and_get_are_one_indexed() {
        let mut choices = Choices::new();
        choices.set(1, Vote::Like).unwrap();
        choices.set(10, Vote::Discard).unwrap();

        assert_eq!(choices.get(1), Some(Vote::Like));
        assert_eq!(choices.slot(0), Vote::Like);
        assert_eq!(choices.get(10), Some(Vote::Discard));
        assert_eq!(choices.get(0), None);
        assert_eq!(choices.get(11), None);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut choices = Choices::new();
        assert_eq!(
            choices.set(0, Vote::Like),
            Err(DomainError::CandidateOutOfRange(0))
        );
        assert_eq!(
            choices.set(11, Vote::Like),
            Err(DomainError::CandidateOutOfRange(11))
        );
    }

    #[test]
    fn test_json_mixed_values() {
        let mut choices = Choices::new();
        choices.set(2, Vote::Like).unwrap();
        choices.set(3, Vote::Discard).unwrap();
        let json = choices.to_json().unwrap();
        assert_eq!(json, "[null,1,0,null,null,null,null,null,null,null]");
        assert_eq!(Choices::from_json(&json).unwrap(), choices);
    }

    #[test]
    fn test_legacy_zero_vector_loads_as_discards() {
        let choices = Choices::from_json("[0,0,0,0,0,0,0,0,0,0]").unwrap();
        assert!(choices.votes().iter().all(Vote::is_discard));
        assert!(!choices.votes().iter().any(Vote::is_like));
    }

    #[test]
    fn test_from_json_rejects_wrong_length_and_garbage() {
        assert!(matches!(
            Choices::from_json("[1,0]"),
            Err(DomainError::InvalidChoices(_))
        ));
        assert!(matches!(
            Choices::from_json("[1,0,"),
            Err(DomainError::InvalidChoices(_))
        ));
        assert!(Choices::from_json("[2,0,0,0,0,0,0,0,0,0]").is_err());
    }
}
