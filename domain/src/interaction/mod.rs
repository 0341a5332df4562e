//! Interaction domain: what an inbound event means.
//!
//! Every inbound event is a single token: the text of a message, or the data
//! carried by a pressed button. The [`classify`] function turns it into a
//! [`Context`] given the participant's current [`Step`](crate::Step). Only
//! actionable contexts change state; the rest are render-only.
//!
//! | Token | Step | Context | Actionable |
//! |-------|------|---------|------------|
//! | `/start` | any | `start` | no |
//! | `/about` | any | `about` | no |
//! | control token | any | same name | yes |
//! | 3 characters | `1` | `join-room` | yes |
//! | contains `discard` | not `2-10` | `discard` | yes |
//! | contains `like` | not `2-10` | `like` | yes |
//! | any / `choice-made` | `2-10` / any | `choice-made` | yes |
//! | `show-result` | `3` | `show-result` | no |
//! | `end` | `3` | `end` | yes |

pub mod classifier;
pub mod context;
pub mod token;

pub use classifier::{ClassifierRule, RULES, RuleContext, classify};
pub use context::{Classification, Context};
pub use token::VoteToken;
