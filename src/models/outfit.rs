//! Outfits, generation requests and the saved-outfit list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wardrobe::WardrobeItem;
use super::weather::WeatherSnapshot;

/// A recommended or saved outfit.
///
/// The backend reports the id as `id`, `outfit_id` or both, and the garments
/// as `top`/`top_item` and `bottom`/`bottom_item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutfit")]
pub struct Outfit {
    pub id: String,
    pub top_item: Option<WardrobeItem>,
    pub bottom_item: Option<WardrobeItem>,
    pub explanation: Option<String>,
    pub occasion: Option<String>,
    /// Weather the outfit was generated for
    pub weather: Option<WeatherSnapshot>,
    pub created_at: Option<String>,
    /// Set on entries of the saved list
    pub saved_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOutfit {
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    outfit_id: Option<String>,
    #[serde(default)]
    top: Option<WardrobeItem>,
    #[serde(default)]
    top_item: Option<WardrobeItem>,
    #[serde(default)]
    bottom: Option<WardrobeItem>,
    #[serde(default)]
    bottom_item: Option<WardrobeItem>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    occasion: Option<String>,
    #[serde(default)]
    weather: Option<Value>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    saved_at: Option<String>,
}

impl TryFrom<RawOutfit> for Outfit {
    type Error = String;

    fn try_from(raw: RawOutfit) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.outfit_id)
            .ok_or_else(|| "outfit is missing `id`".to_string())?;

        Ok(Self {
            id,
            top_item: raw.top.or(raw.top_item),
            bottom_item: raw.bottom.or(raw.bottom_item),
            explanation: raw.explanation,
            occasion: raw.occasion,
            weather: raw.weather.and_then(weather_context),
            created_at: raw.created_at,
            saved_at: raw.saved_at,
        })
    }
}

/// The stored weather context is informational; an empty or unreadable
/// object is dropped rather than failing the whole outfit.
fn weather_context(value: Value) -> Option<WeatherSnapshot> {
    match &value {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(value).ok(),
        _ => None,
    }
}

impl Outfit {
    /// True when both garments are present.
    pub fn is_complete(&self) -> bool {
        self.top_item.is_some() && self.bottom_item.is_some()
    }
}

/// Body of `POST /api/users/{id}/outfit/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutfitRequest<'a> {
    pub occasion: &'a str,
    pub weather: &'a WeatherSnapshot,
}

/// Body of `POST /api/users/{id}/outfits/saved`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutfitRequest<'a> {
    pub outfit_id: &'a str,
}

/// Acknowledgement returned when an outfit is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveConfirmation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub outfit: Option<Outfit>,
}

/// The saved-outfit endpoint answers with either a bare array or an object
/// wrapping it under `outfits`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOutfitList {
    Bare(Vec<Outfit>),
    Wrapped { outfits: Vec<Outfit> },
}

/// Normalize a saved-outfit response into a plain list.
pub fn parse_outfit_list(value: Value) -> Result<Vec<Outfit>, serde_json::Error> {
    Ok(match serde_json::from_value(value)? {
        RawOutfitList::Bare(outfits) | RawOutfitList::Wrapped { outfits } => outfits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn garment(id: &str, part: &str) -> Value {
        json!({"id": id, "category": part, "style": "casual", "weather": "cold"})
    }

    #[test]
    fn test_backend_shape_with_both_ids() {
        let outfit: Outfit = serde_json::from_value(json!({
            "id": "o1",
            "outfit_id": "o1",
            "top": garment("t", "shirt"),
            "bottom": garment("b", "jeans"),
            "occasion": "casual",
            "weather": {"temperature": 10, "condition": "Rain"},
            "explanation": "Layer up",
            "created_at": "2024-01-01T00:00:00",
            "saved_at": null
        }))
        .unwrap();

        assert_eq!(outfit.id, "o1");
        assert!(outfit.is_complete());
        assert_eq!(outfit.top_item.as_ref().unwrap().id, "t");
        assert_eq!(outfit.weather.as_ref().unwrap().condition, "Rain");
        assert!(outfit.saved_at.is_none());
    }

    #[test]
    fn test_alternate_field_names() {
        let outfit: Outfit = serde_json::from_value(json!({
            "outfit_id": "o2",
            "top_item": garment("t", "shirt"),
            "bottom_item": null,
            "weather": {}
        }))
        .unwrap();

        assert_eq!(outfit.id, "o2");
        assert!(outfit.top_item.is_some());
        assert!(!outfit.is_complete());
        assert!(outfit.weather.is_none());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<Outfit, _> = serde_json::from_value(json!({"occasion": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bare_and_wrapped_lists() {
        let bare = parse_outfit_list(json!([{"id": "a"}, {"outfit_id": "b"}])).unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare[1].id, "b");

        let wrapped = parse_outfit_list(json!({"outfits": [{"id": "c"}]})).unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].id, "c");

        assert!(parse_outfit_list(json!({"items": []})).is_err());
    }

    #[test]
    fn test_generate_request_body() {
        let weather: WeatherSnapshot =
            serde_json::from_value(json!({"temperature": 5, "condition": "Snow"})).unwrap();
        let body = serde_json::to_value(GenerateOutfitRequest {
            occasion: "work",
            weather: &weather,
        })
        .unwrap();
        assert_eq!(body["occasion"], "work");
        assert_eq!(body["weather"]["condition"], "Snow");
    }
}
