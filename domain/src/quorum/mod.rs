//! Room consensus domain
//!
//! Every participant fills one [`Choices`] vector while voting. Consensus is
//! the veto-on-discard intersection of the vectors of everyone in a room:
//!
//! ```text
//! candidate      1  2  3
//! alice          1  1  0
//! bob            0  1  1
//! ─────────────────────────
//! merged         0  1  0     (one discard vetoes)
//! ```

pub mod choices;
pub mod consensus;
pub mod vote;

// Re-export main types
pub use choices::Choices;
pub use consensus::{CandidateStatus, RoomConsensus};
pub use vote::Vote;
