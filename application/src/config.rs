//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave.

/// Default number of room codes tried before giving up on creating a room
pub const DEFAULT_ROOM_CODE_ATTEMPTS: usize = 8;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// How many generated room codes to try before reporting that no room
    /// could be created. Codes already in use by a live room are skipped.
    pub room_code_attempts: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            room_code_attempts: DEFAULT_ROOM_CODE_ATTEMPTS,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a custom number of room code attempts.
    ///
    /// At least one attempt is always made.
    pub fn with_room_code_attempts(attempts: usize) -> Self {
        Self {
            room_code_attempts: attempts.max(1),
        }
    }
}
