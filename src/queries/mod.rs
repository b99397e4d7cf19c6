//! Resource hooks over the query cache.
//!
//! Each hook derives its cache key from the current session, reads through
//! the [`QueryClient`](crate::cache::QueryClient) and invalidates dependent
//! keys after a successful mutation. User-scoped hooks never touch the
//! network without a session: reads return an idle entry and awaitable
//! operations fail with [`AuthError::NotAuthenticated`](crate::error::AuthError).

mod feedback;
mod outfits;
mod wardrobe;
mod weather;

pub use feedback::FeedbackMutation;
pub use outfits::{saved_outfits_key, OutfitQueries};
pub use wardrobe::{wardrobe_item_key, wardrobe_key, WardrobeQueries};
pub use weather::{weather_key, WeatherQuery};
