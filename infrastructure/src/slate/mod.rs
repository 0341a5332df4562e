//! Candidate slate sources

mod daily_cache;

pub use daily_cache::DailySlateCache;
