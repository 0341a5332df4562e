//! Shared candidate slate
//!
//! Holds the slate every room votes on. It is refreshed when a participant
//! confirms their room and loaded lazily if a reply needs it before that
//! (e.g. after a restart).

use crate::ports::slate_source::{SlateError, SlateSource};
use pickflick_domain::Slate;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// The slate currently in use, shared across all rooms
pub struct CurrentSlate<L: SlateSource + 'static> {
    source: Arc<L>,
    slate: RwLock<Slate>,
}

impl<L: SlateSource + 'static> CurrentSlate<L> {
    pub fn new(source: Arc<L>) -> Self {
        Self {
            source,
            slate: RwLock::new(Slate::default()),
        }
    }

    /// Reload the slate from the source
    ///
    /// On failure the previous slate is kept.
    pub async fn refresh(&self) -> Result<usize, SlateError> {
        let slate = self.source.load_current().await?;
        let len = slate.len();
        *self.slate.write().await = slate;
        info!("Slate refreshed with {} movies", len);
        Ok(len)
    }

    /// The slate in use, loading it first if none has been loaded yet
    pub async fn get(&self) -> Slate {
        {
            let slate = self.slate.read().await;
            if !slate.is_empty() {
                return slate.clone();
            }
        }

        if let Err(e) = self.refresh().await {
            warn!("No slate loaded and refresh failed: {}", e);
        }
        self.slate.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pickflick_domain::Movie;
    use std::sync::Mutex;

    struct MockSlateSource {
        slates: Mutex<Vec<Result<Slate, SlateError>>>,
    }

    impl MockSlateSource {
        fn new(slates: Vec<Result<Slate, SlateError>>) -> Self {
            Self {
                slates: Mutex::new(slates),
            }
        }
    }

    #[async_trait]
    impl SlateSource for MockSlateSource {
        async fn load_current(&self) -> Result<Slate, SlateError> {
            let mut slates = self.slates.lock().unwrap();
            if slates.is_empty() {
                return Err(SlateError::Unavailable("exhausted".to_string()));
            }
            slates.remove(0)
        }
    }

    fn one_movie(title: &str) -> Slate {
        Slate::new(vec![Movie::new(title, "https://example.org")]).unwrap()
    }

    #[tokio::test]
    async fn test_get_loads_lazily() {
        let current = CurrentSlate::new(Arc::new(MockSlateSource::new(vec![Ok(one_movie(
            "Alien",
        ))])));
        let slate = current.get().await;
        assert_eq!(slate.candidate(1).unwrap().title, "Alien");

        // cached: the source is exhausted now
        assert_eq!(current.get().await, slate);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_slate() {
        let current = CurrentSlate::new(Arc::new(MockSlateSource::new(vec![
            Ok(one_movie("Alien")),
            Err(SlateError::Unavailable("offline".to_string())),
        ])));
        assert_eq!(current.refresh().await.unwrap(), 1);
        assert!(current.refresh().await.is_err());
        assert_eq!(current.get().await.candidate(1).unwrap().title, "Alien");
    }

    #[tokio::test]
    async fn test_get_without_source_is_empty() {
        let current = CurrentSlate::new(Arc::new(MockSlateSource::new(vec![])));
        assert!(current.get().await.is_empty());
    }
}
