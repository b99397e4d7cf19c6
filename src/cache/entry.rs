//! Snapshots of cache entries.

use tokio::time::Instant;

use super::key::QueryKey;
use crate::error::ClosetError;

/// Lifecycle of one cache entry.
///
/// `Idle → Loading → {Success, Error}`, and back to `Loading` whenever a
/// fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Point-in-time view of a cache entry.
///
/// Data from an earlier successful fetch is kept while a refetch is loading
/// or after it failed.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub key: QueryKey,
    pub data: Option<T>,
    pub status: QueryStatus,
    pub error: Option<ClosetError>,
    pub last_fetched_at: Option<Instant>,
    pub is_stale: bool,
    pub is_fetching: bool,
}

impl<T> CacheEntry<T> {
    /// An entry nobody has fetched yet.
    pub fn idle(key: QueryKey) -> Self {
        Self {
            key,
            data: None,
            status: QueryStatus::Idle,
            error: None,
            last_fetched_at: None,
            is_stale: true,
            is_fetching: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    /// Loading with nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading && self.data.is_none()
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Transform the data while keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheEntry<U> {
        CacheEntry {
            key: self.key,
            data: self.data.map(f),
            status: self.status,
            error: self.error,
            last_fetched_at: self.last_fetched_at,
            is_stale: self.is_stale,
            is_fetching: self.is_fetching,
        }
    }
}
