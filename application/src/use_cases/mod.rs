//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod current_slate;
pub mod execute_action;
pub mod handle_event;
pub mod room_results;
#[cfg(test)]
pub(crate) mod test_support;
