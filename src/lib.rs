//! Closet - client-side data layer for the wardrobe service
//!
//! - [`api`]: HTTP client and typed resource clients
//! - [`auth`]: session state, login/signup/logout and persisted credentials
//! - [`cache`]: the query cache with per-key deduplication and staleness
//! - [`queries`]: per-resource hooks over the cache
//! - [`ClosetClient`]: everything wired together from a [`ClientConfig`]

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod queries;
pub mod traits;

pub use client::ClosetClient;
pub use config::ClientConfig;
pub use error::{ClosetError, ClosetResult};
