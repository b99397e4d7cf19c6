//! Domain records exchanged with the wardrobe backend.
//!
//! Each record normalizes the field spellings the backend is known to emit
//! into one canonical shape at deserialization time, so nothing above this
//! module ever sees the alternates.

mod auth;
mod feedback;
mod outfit;
mod wardrobe;
mod weather;

pub use auth::{AuthRequest, AuthResponse};
pub use feedback::{FeedbackReaction, FeedbackReceipt, FeedbackRecord, FeedbackRequest};
pub use outfit::{
    parse_outfit_list, GenerateOutfitRequest, Outfit, SaveConfirmation, SaveOutfitRequest,
};
pub use wardrobe::{ImageUpload, NewWardrobeItem, WardrobeFilter, WardrobeItem};
pub use weather::WeatherSnapshot;

use serde::Deserializer;

/// Helper to deserialize an optional id given as a string, an integer or null
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, an integer or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
