//! Session domain
//!
//! A [`SessionRecord`] is one participant's persisted progress through the
//! flow: room pending, voting on candidate `n`, done.

pub mod entities;
pub mod participant;
pub mod room;
pub mod step;

pub use entities::{SessionMutation, SessionRecord};
pub use participant::ParticipantId;
pub use room::{ROOM_CODE_ALPHABET, ROOM_CODE_LEN, RoomCode};
pub use step::Step;
