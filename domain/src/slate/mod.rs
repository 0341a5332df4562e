//! Candidate slate
//!
//! The weekly list of movies a room votes on. The slate comes from outside
//! the session flow and is never mutated by it.

use crate::SLATE_SIZE;
use crate::core::error::DomainError;
use crate::quorum::RoomConsensus;
use serde::{Deserialize, Serialize};

/// One candidate movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// Detail page
    pub link: String,
    #[serde(default)]
    pub description: String,
    /// Poster image URL
    #[serde(default)]
    pub poster: String,
}

impl Movie {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: String::new(),
            poster: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }
}

/// Ordered list of at most [`SLATE_SIZE`] movies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Movie>", into = "Vec<Movie>")]
pub struct Slate {
    movies: Vec<Movie>,
}

impl Slate {
    pub fn new(movies: Vec<Movie>) -> Result<Self, DomainError> {
        if movies.len() > SLATE_SIZE {
            return Err(DomainError::SlateTooLarge(movies.len()));
        }
        Ok(Self { movies })
    }

    /// Movie for a 1-indexed candidate
    pub fn candidate(&self, candidate: usize) -> Option<&Movie> {
        candidate.checked_sub(1).and_then(|i| self.movies.get(i))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movies the whole room agreed on, in slate order
    pub fn picks(&self, consensus: &RoomConsensus) -> Vec<&Movie> {
        consensus
            .agreed()
            .into_iter()
            .filter_map(|i| self.movies.get(i))
            .collect()
    }
}

impl TryFrom<Vec<Movie>> for Slate {
    type Error = DomainError;

    fn try_from(movies: Vec<Movie>) -> Result<Self, Self::Error> {
        Self::new(movies)
    }
}

impl From<Slate> for Vec<Movie> {
    fn from(slate: Slate) -> Self {
        slate.movies
    }
}
