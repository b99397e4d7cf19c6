//! Staleness and refetch policy.

use std::time::Duration;
use tokio::time::Instant;

/// Staleness and periodic refetch for weather data: five minutes.
pub const WEATHER_REFRESH: Duration = Duration::from_millis(300_000);

/// How long cached data stays fresh, and how often it is refetched
/// unprompted.
///
/// The default keeps data fresh until it is invalidated and never refetches
/// on a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_time: Option<Duration>,
    pub refetch_interval: Option<Duration>,
}

impl QueryPolicy {
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }

    pub fn with_refetch_interval(mut self, interval: Duration) -> Self {
        self.refetch_interval = Some(interval);
        self
    }

    /// Policy used for `["weather"]`.
    pub fn weather() -> Self {
        Self::default()
            .with_stale_time(WEATHER_REFRESH)
            .with_refetch_interval(WEATHER_REFRESH)
    }

    /// Data fetched at `fetched_at` is stale once `stale_time` has fully
    /// elapsed.
    pub fn is_expired(&self, fetched_at: Instant, now: Instant) -> bool {
        match self.stale_time {
            Some(stale_time) => now.saturating_duration_since(fetched_at) >= stale_time,
            None => false,
        }
    }
}
