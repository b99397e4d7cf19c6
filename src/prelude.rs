//! Prelude module for convenient imports.
//!
//! ```ignore
//! use closet::prelude::*;
//! ```

pub use crate::auth::{Session, SessionEvent, SessionStore};
pub use crate::cache::{CacheEntry, QueryClient, QueryKey, QueryPolicy, QueryStatus};
pub use crate::client::ClosetClient;
pub use crate::config::ClientConfig;
pub use crate::error::{AuthError, ClosetError, ClosetResult, NetworkError};
pub use crate::models::{
    FeedbackReaction, NewWardrobeItem, Outfit, WardrobeFilter, WardrobeItem, WeatherSnapshot,
};
