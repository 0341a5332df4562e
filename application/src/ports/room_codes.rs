//! Room code generator port

use pickflick_domain::RoomCode;

/// Produces new room codes
///
/// Codes need not be unique; the caller checks for collisions with live rooms.
pub trait RoomCodeGenerator: Send + Sync {
    fn generate(&self) -> RoomCode;
}
