//! Unified error handling for the Closet client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: [`NetworkError`] (no response, or a non-2xx status)
//!   and [`AuthError`] (login/signup failures, missing or expired session)
//! - **Unified type**: [`ClosetError`] and the [`ClosetResult`] alias
//!
//! | Category | Source | Retryable |
//! |----------|--------|-----------|
//! | Network | connection refused, timeout | Yes |
//! | Auth | 401, login/signup failure, no session | No |
//! | Server | HTTP 5xx | Yes |
//! | Client | other HTTP 4xx, undecodable body | No |
//! | Configuration | malformed URL or request | No |
//!
//! Nothing in the crate retries automatically; "retryable" is advice for the
//! caller.

mod auth;
mod category;
mod closet_error;
mod network;
mod result;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use closet_error::ClosetError;
pub use network::{classify_transport_error, extract_error_message, NetworkError};
pub use result::ClosetResult;
