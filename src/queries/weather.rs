//! Current weather with time-based staleness.

use crate::api::WeatherApi;
use crate::cache::{CacheEntry, IntervalRefetch, QueryClient, QueryKey, QueryPolicy, WEATHER_REFRESH};
use crate::error::ClosetResult;
use crate::models::WeatherSnapshot;

/// `["weather"]`
pub fn weather_key() -> QueryKey {
    QueryKey::new("weather")
}

/// Weather is shared by every user and stays fresh for five minutes.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    api: WeatherApi,
    cache: QueryClient,
    policy: QueryPolicy,
}

impl WeatherQuery {
    pub fn new(api: WeatherApi, cache: QueryClient) -> Self {
        Self {
            api,
            cache,
            policy: QueryPolicy::weather(),
        }
    }

    pub fn with_policy(mut self, policy: QueryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> QueryPolicy {
        self.policy
    }

    pub fn current(&self) -> CacheEntry<WeatherSnapshot> {
        let api = self.api.clone();
        self.cache
            .query(&weather_key(), self.policy, move || async move { api.current().await })
    }

    pub async fn fetch(&self) -> ClosetResult<WeatherSnapshot> {
        let api = self.api.clone();
        self.cache
            .fetch(&weather_key(), self.policy, move || async move { api.current().await })
            .await
    }

    pub async fn refetch(&self) -> ClosetResult<WeatherSnapshot> {
        let api = self.api.clone();
        self.cache
            .refetch(&weather_key(), self.policy, move || async move { api.current().await })
            .await
    }

    /// Refetch on the policy's interval until the handle is dropped.
    pub fn start_auto_refetch(&self) -> IntervalRefetch {
        let period = self.policy.refetch_interval.unwrap_or(WEATHER_REFRESH);
        let api = self.api.clone();
        self.cache.refetch_every(&weather_key(), self.policy, period, move || {
            let api = api.clone();
            async move { api.current().await }
        })
    }
}
