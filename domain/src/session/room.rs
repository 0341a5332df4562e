//! Room code value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of characters in a room code
pub const ROOM_CODE_LEN: usize = 3;

/// Characters room codes are drawn from.
///
/// `l` and `1` are left out so codes read back unambiguously.
pub const ROOM_CODE_ALPHABET: &str = "abcdefghijkmnopqrstuvwxyz023456789";

/// Short code shared by every participant of one voting session
///
/// A room has no record of its own. It exists only as the value shared by
/// the session records of its participants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Validate and wrap a room code
    ///
    /// Accepts any [`ROOM_CODE_LEN`] ASCII alphanumeric characters, so codes
    /// typed by hand are looked up exactly as sent.
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        let valid = code.chars().count() == ROOM_CODE_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Self(code))
        } else {
            Err(DomainError::InvalidRoomCode(code))
        }
    }

    /// Build a code from positions in [`ROOM_CODE_ALPHABET`]
    ///
    /// Positions wrap around the alphabet, so any input yields a valid code.
    pub fn from_alphabet_indices(indices: [usize; ROOM_CODE_LEN]) -> Self {
        let alphabet = ROOM_CODE_ALPHABET.as_bytes();
        let code = indices
            .iter()
            .map(|i| char::from(alphabet[i % alphabet.len()]))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RoomCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
