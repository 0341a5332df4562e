//! Daily slate cache
//!
//! Slates live as `<cache_dir>/<YYYY-MM-DD>.json`, each a JSON array of
//! `{title, link, description, poster}` objects. Today's file is preferred;
//! otherwise the most recent dated file is used.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use pickflick_application::{SlateError, SlateSource};
use pickflick_domain::{Movie, SLATE_SIZE, Slate};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// [`SlateSource`] reading the dated JSON files of a cache directory
#[derive(Debug, Clone)]
pub struct DailySlateCache {
    dir: PathBuf,
    date: Option<NaiveDate>,
}

impl DailySlateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            date: None,
        }
    }

    /// Pin the day whose file is preferred (defaults to today)
    pub fn for_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Path of the slate file for a day
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format(DATE_FORMAT)))
    }

    fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Most recent dated slate file in the cache directory
    async fn latest(&self) -> Result<Option<(NaiveDate, PathBuf)>, SlateError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<(NaiveDate, PathBuf)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(date) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            else {
                continue;
            };
            if latest.as_ref().is_none_or(|(best, _)| date > *best) {
                latest = Some((date, path));
            }
        }
        Ok(latest)
    }
}

/// Parse a slate file, keeping at most [`SLATE_SIZE`] movies
fn parse_slate(path: &Path, raw: &str) -> Result<Slate, SlateError> {
    let mut movies: Vec<Movie> = serde_json::from_str(raw)
        .map_err(|e| SlateError::Parse(format!("{}: {}", path.display(), e)))?;
    if movies.len() > SLATE_SIZE {
        warn!(
            "Slate {} lists {} movies, keeping the first {}",
            path.display(),
            movies.len(),
            SLATE_SIZE
        );
        movies.truncate(SLATE_SIZE);
    }
    Ok(Slate::new(movies)?)
}

#[async_trait]
impl SlateSource for DailySlateCache {
    async fn load_current(&self) -> Result<Slate, SlateError> {
        let today = self.today();
        let path = self.path_for(today);

        let path = if tokio::fs::try_exists(&path).await? {
            path
        } else {
            match self.latest().await? {
                Some((date, latest)) => {
                    warn!(
                        "No slate for {}, falling back to the one from {}",
                        today, date
                    );
                    latest
                }
                None => {
                    return Err(SlateError::Unavailable(format!(
                        "no dated slate file in {}",
                        self.dir.display()
                    )));
                }
            }
        };

        debug!("Loading slate from {}", path.display());
        let raw = tokio::fs::read_to_string(&path).await?;
        parse_slate(&path, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn movies_json(n: usize) -> String {
        let movies: Vec<_> = (1..=n)
            .map(|i| {
                serde_json::json!({
                    "title": format!("Movie {i}"),
                    "link": format!("https://example.org/{i}"),
                    "description": format!("Plot {i}"),
                    "poster": format!("https://example.org/{i}.jpg"),
                })
            })
            .collect();
        serde_json::to_string(&movies).unwrap()
    }

    #[tokio::test]
    async fn test_loads_todays_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2026-03-01.json"), movies_json(10)).unwrap();
        std::fs::write(dir.path().join("2026-02-28.json"), movies_json(2)).unwrap();

        let slate = DailySlateCache::new(dir.path())
            .for_date(day("2026-03-01"))
            .load_current()
            .await
            .unwrap();
        assert_eq!(slate.len(), 10);
        assert_eq!(slate.candidate(1).unwrap().title, "Movie 1");
    }

    #[tokio::test]
    async fn test_falls_back_to_latest_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2026-02-27.json"), movies_json(3)).unwrap();
        std::fs::write(dir.path().join("2026-02-28.json"), movies_json(5)).unwrap();
        std::fs::write(dir.path().join("sessions.csv"), "").unwrap();
        std::fs::write(dir.path().join("notes.json"), "[]").unwrap();

        let slate = DailySlateCache::new(dir.path())
            .for_date(day("2026-03-01"))
            .load_current()
            .await
            .unwrap();
        assert_eq!(slate.len(), 5);
    }

    #[tokio::test]
    async fn test_missing_cache_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DailySlateCache::new(dir.path().join("nope"));
        assert!(matches!(
            cache.load_current().await,
            Err(SlateError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_oversized_slate_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2026-03-01.json"), movies_json(14)).unwrap();

        let slate = DailySlateCache::new(dir.path())
            .for_date(day("2026-03-01"))
            .load_current()
            .await
            .unwrap();
        assert_eq!(slate.len(), SLATE_SIZE);
        assert_eq!(slate.candidate(10).unwrap().title, "Movie 10");
    }

    #[tokio::test]
    async fn test_unparsable_slate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2026-03-01.json"), "{not a list").unwrap();

        let result = DailySlateCache::new(dir.path())
            .for_date(day("2026-03-01"))
            .load_current()
            .await;
        assert!(matches!(result, Err(SlateError::Parse(_))));
    }

    #[test]
    fn test_path_for() {
        let cache = DailySlateCache::new("db");
        assert_eq!(
            cache.path_for(day("2026-01-05")),
            PathBuf::from("db/2026-01-05.json")
        );
    }
}
