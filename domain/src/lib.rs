//! Domain layer for pickflick
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! Every participant has one [`SessionRecord`]: the [`Step`] they are on,
//! the [`RoomCode`] they share with friends, and a [`Choices`] vector with
//! one [`Vote`] per slate candidate.
//!
//! ## Interaction
//!
//! Inbound tokens are classified into a [`Context`] by an ordered rule table
//! ([`classify`]). Actionable contexts map to [`SessionMutation`]s.
//!
//! ## Quorum
//!
//! A room's result is the veto-on-discard intersection of every
//! participant's choices ([`RoomConsensus`]).

pub mod core;
pub mod interaction;
pub mod quorum;
pub mod session;
pub mod slate;

/// Number of candidates on a slate, and slots in every vote vector
pub const SLATE_SIZE: usize = 10;

// Re-export commonly used types
pub use core::error::DomainError;
pub use interaction::{Classification, ClassifierRule, Context, RULES, VoteToken, classify};
pub use quorum::{CandidateStatus, Choices, RoomConsensus, Vote};
pub use session::{
    ParticipantId, ROOM_CODE_ALPHABET, ROOM_CODE_LEN, RoomCode, SessionMutation, SessionRecord,
    Step,
};
pub use slate::{Movie, Slate};
