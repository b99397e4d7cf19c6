//! Typed access to the wardrobe backend.
//!
//! [`ApiClient`] is the HTTP layer every resource module goes through. The
//! resource clients build paths and payloads, and leave field-name
//! normalization to the [`crate::models`] types they decode into.

mod auth;
mod client;
mod feedback;
mod outfit;
mod wardrobe;
mod weather;

pub use auth::AuthApi;
pub use client::{ApiClient, RequestBody};
pub use feedback::FeedbackApi;
pub use outfit::OutfitApi;
pub use wardrobe::WardrobeApi;
pub use weather::WeatherApi;

use std::borrow::Cow;

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
