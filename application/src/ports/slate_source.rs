//! Slate source port
//!
//! Where the weekly candidate slate comes from.

use async_trait::async_trait;
use pickflick_domain::{DomainError, Slate};
use thiserror::Error;

/// Errors that can occur while loading a slate
#[derive(Error, Debug)]
pub enum SlateError {
    #[error("No slate available: {0}")]
    Unavailable(String),

    #[error("Slate I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Slate could not be parsed: {0}")]
    Parse(String),

    #[error("Invalid slate: {0}")]
    Invalid(#[from] DomainError),
}

/// Source of the current candidate slate
#[async_trait]
pub trait SlateSource: Send + Sync {
    /// Load the slate for today
    async fn load_current(&self) -> Result<Slate, SlateError>;
}
