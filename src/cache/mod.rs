//! Query cache module
//!
//! Keyed cache of fetched resources with per-key request deduplication,
//! staleness policies and invalidation.

mod client;
mod entry;
mod key;
mod policy;

pub use client::{IntervalRefetch, QueryClient};
pub use entry::{CacheEntry, QueryStatus};
pub use key::QueryKey;
pub use policy::{QueryPolicy, WEATHER_REFRESH};
