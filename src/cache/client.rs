//! The shared query cache.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::entry::{CacheEntry, QueryStatus};
use super::key::QueryKey;
use super::policy::QueryPolicy;
use crate::error::{ClosetError, ClosetResult};

type AnyData = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyData, ClosetError>>>;

struct InFlight {
    id: u64,
    future: SharedFetch,
    /// Set when the key was invalidated while this fetch was running
    refetch_after: bool,
}

struct Slot {
    data: Option<AnyData>,
    error: Option<ClosetError>,
    status: QueryStatus,
    fetched_at: Option<Instant>,
    invalidated: bool,
    policy: QueryPolicy,
    in_flight: Option<InFlight>,
}

impl Slot {
    fn new(policy: QueryPolicy) -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Idle,
            fetched_at: None,
            invalidated: false,
            policy,
            in_flight: None,
        }
    }

    fn is_stale(&self, now: Instant) -> bool {
        if self.invalidated {
            return true;
        }
        match self.fetched_at {
            Some(fetched_at) => self.policy.is_expired(fetched_at, now),
            None => true,
        }
    }

    fn snapshot<T: Clone + 'static>(&self, key: &QueryKey, now: Instant) -> CacheEntry<T> {
        CacheEntry {
            key: key.clone(),
            data: downcast(self.data.as_ref()),
            status: self.status,
            error: self.error.clone(),
            last_fetched_at: self.fetched_at,
            is_stale: self.is_stale(now),
            is_fetching: self.in_flight.is_some(),
        }
    }
}

fn downcast<T: Clone + 'static>(data: Option<&AnyData>) -> Option<T> {
    data.and_then(|d| d.downcast_ref::<T>()).cloned()
}

fn type_mismatch(key: &QueryKey) -> ClosetError {
    ClosetError::invalid_response(format!("cached data for {} has an unexpected type", key))
}

/// Cache of fetched resources keyed by [`QueryKey`].
///
/// At most one fetch per key is in flight; every caller that triggers the
/// key meanwhile joins it. Fetches run on a spawned task, so a caller that
/// stops waiting does not cancel the request for the others. All methods that
/// may start a fetch must run inside a Tokio runtime.
///
/// Fetcher closures are invoked while the cache lock is held and must not
/// call back into the cache synchronously; the futures they return may.
///
/// # Example
///
/// ```ignore
/// let cache = QueryClient::new();
/// let key = QueryKey::new("weather");
/// let weather = cache
///     .fetch(&key, QueryPolicy::weather(), move || async move { api.current().await })
///     .await?;
/// ```
#[derive(Clone, Default)]
pub struct QueryClient {
    slots: Arc<Mutex<HashMap<QueryKey, Slot>>>,
    next_fetch_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.lock().len())
            .finish()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state of `key` without triggering anything.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> CacheEntry<T> {
        let slots = self.lock();
        match slots.get(key) {
            Some(slot) => slot.snapshot(key, Instant::now()),
            None => CacheEntry::idle(key.clone()),
        }
    }

    /// Return the current entry, starting a background fetch when it is idle
    /// or stale and nothing is in flight.
    pub fn query<T, F, Fut>(&self, key: &QueryKey, policy: QueryPolicy, fetcher: F) -> CacheEntry<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClosetResult<T>> + Send + 'static,
    {
        let mut slots = self.lock();
        let now = Instant::now();
        let slot = slots
            .entry(key.clone())
            .or_insert_with(|| Slot::new(policy));
        slot.policy = policy;

        if slot.in_flight.is_none() && slot.is_stale(now) {
            // The spawned task keeps the fetch running; callers read the slot.
            let _fetch = self.start(slot, key, fetcher());
        }
        slot.snapshot(key, now)
    }

    /// Cached data when fresh, otherwise the result of the single in-flight
    /// fetch for `key`.
    ///
    /// A fresh entry in `Error` returns its stored error without a new
    /// request.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetcher: F,
    ) -> ClosetResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClosetResult<T>> + Send + 'static,
    {
        let pending = {
            let mut slots = self.lock();
            let slot = slots
                .entry(key.clone())
                .or_insert_with(|| Slot::new(policy));
            slot.policy = policy;

            if let Some(in_flight) = &slot.in_flight {
                in_flight.future.clone()
            } else if slot.is_stale(Instant::now()) {
                self.start(slot, key, fetcher())
            } else {
                match (slot.status, slot.error.clone()) {
                    (QueryStatus::Success, _) => {
                        return downcast(slot.data.as_ref()).ok_or_else(|| type_mismatch(key));
                    }
                    (QueryStatus::Error, Some(stored)) => return Err(stored),
                    _ => self.start(slot, key, fetcher()),
                }
            }
        };

        self.resolve(key, pending).await
    }

    /// Fetch regardless of freshness, joining a fetch already in flight.
    pub async fn refetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetcher: F,
    ) -> ClosetResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClosetResult<T>> + Send + 'static,
    {
        let pending = {
            let mut slots = self.lock();
            let slot = slots
                .entry(key.clone())
                .or_insert_with(|| Slot::new(policy));
            slot.policy = policy;

            match &slot.in_flight {
                Some(in_flight) => in_flight.future.clone(),
                None => self.start(slot, key, fetcher()),
            }
        };

        self.resolve(key, pending).await
    }

    /// Refetch `key` every `period` until the returned handle is dropped.
    /// The first refetch happens one period from now.
    pub fn refetch_every<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        period: Duration,
        fetcher: F,
    ) -> IntervalRefetch
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClosetResult<T>> + Send + 'static,
    {
        let client = self.clone();
        let key = key.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!(%key, "Interval refetch");
                if let Err(e) = client.refetch::<T, _, _>(&key, policy, &fetcher).await {
                    tracing::warn!(%key, error = %e, "Interval refetch failed");
                }
            }
        });

        IntervalRefetch { task }
    }

    /// Mark `key` stale so the next read refetches. Returns whether the key
    /// was cached.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut slots = self.lock();
        match slots.get_mut(key) {
            Some(slot) => {
                Self::mark_invalid(slot);
                tracing::debug!(%key, "Invalidated");
                true
            }
            None => false,
        }
    }

    /// Invalidate every key under `prefix`. Returns how many were marked.
    pub fn invalidate_matching(&self, prefix: &QueryKey) -> usize {
        let mut slots = self.lock();
        let mut count = 0;
        for (key, slot) in slots.iter_mut() {
            if key.starts_with(prefix) {
                Self::mark_invalid(slot);
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "Invalidated matching keys");
        count
    }

    fn mark_invalid(slot: &mut Slot) {
        slot.invalidated = true;
        if let Some(in_flight) = slot.in_flight.as_mut() {
            in_flight.refetch_after = true;
        }
    }

    /// Replace the cached data for `key` as if it had just been fetched.
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey, data: T) {
        let mut slots = self.lock();
        let slot = slots
            .entry(key.clone())
            .or_insert_with(|| Slot::new(QueryPolicy::default()));
        slot.data = Some(Arc::new(data));
        slot.error = None;
        if slot.in_flight.is_none() {
            slot.status = QueryStatus::Success;
        }
        slot.fetched_at = Some(Instant::now());
        slot.invalidated = false;
    }

    /// Edit cached data in place. Returns `false` when there is no data of
    /// type `T` for `key`.
    pub fn update_query_data<T, F>(&self, key: &QueryKey, update: F) -> bool
    where
        T: Send + Sync + 'static,
        F: FnOnce(&T) -> T,
    {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(key) else {
            return false;
        };
        let Some(current) = slot.data.as_ref().and_then(|d| d.downcast_ref::<T>()) else {
            return false;
        };
        let next = update(current);
        slot.data = Some(Arc::new(next));
        true
    }

    /// Drop one entry. A fetch still in flight for it lands nowhere.
    pub fn remove(&self, key: &QueryKey) {
        self.lock().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut slots = self.lock();
        tracing::debug!(entries = slots.len(), "Clearing query cache");
        slots.clear();
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|slot| slot.in_flight.is_some())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn start<T, Fut>(&self, slot: &mut Slot, key: &QueryKey, fut: Fut) -> SharedFetch
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = ClosetResult<T>> + Send + 'static,
    {
        let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        let client = self.clone();
        let task_key = key.clone();

        let future = async move {
            let result = fut.await.map(|data| Arc::new(data) as AnyData);
            client.complete(&task_key, id, &result);
            result
        }
        .boxed()
        .shared();

        tokio::spawn(future.clone());

        tracing::debug!(%key, fetch_id = id, "Starting fetch");
        slot.status = QueryStatus::Loading;
        slot.in_flight = Some(InFlight {
            id,
            future: future.clone(),
            refetch_after: false,
        });
        future
    }

    fn complete(&self, key: &QueryKey, id: u64, result: &Result<AnyData, ClosetError>) {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(key) else {
            tracing::debug!(%key, fetch_id = id, "Fetch landed after its entry was removed");
            return;
        };
        if slot.in_flight.as_ref().map(|f| f.id) != Some(id) {
            return;
        }
        let refetch_after = slot.in_flight.take().is_some_and(|f| f.refetch_after);

        slot.fetched_at = Some(Instant::now());
        slot.invalidated = refetch_after;
        match result {
            Ok(data) => {
                slot.data = Some(data.clone());
                slot.error = None;
                slot.status = QueryStatus::Success;
                tracing::debug!(%key, fetch_id = id, "Fetch succeeded");
            }
            Err(e) => {
                slot.error = Some(e.clone());
                slot.status = QueryStatus::Error;
                tracing::debug!(%key, fetch_id = id, error = %e, "Fetch failed");
            }
        }
    }

    async fn resolve<T: Clone + 'static>(
        &self,
        key: &QueryKey,
        pending: SharedFetch,
    ) -> ClosetResult<T> {
        let data = pending.await?;
        data.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| type_mismatch(key))
    }
}

/// Handle for a periodic refetch started by [`QueryClient::refetch_every`].
/// Dropping it stops the timer.
#[derive(Debug)]
pub struct IntervalRefetch {
    task: JoinHandle<()>,
}

impl IntervalRefetch {
    pub fn stop(self) {}
}

impl Drop for IntervalRefetch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
