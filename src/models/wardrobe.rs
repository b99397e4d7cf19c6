//! Wardrobe items, upload payloads and the dashboard filter.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::traits::{FilePart, MultipartForm};

/// A clothing item in the user's wardrobe.
///
/// Deserialization accepts the spellings the backend has used over time
/// (`id`/`_id`, `image_url`/`imageUrl`, `weather`/`weather_suitability`) and
/// always serializes the canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWardrobeItem")]
pub struct WardrobeItem {
    pub id: String,
    pub category: String,
    pub style: String,
    pub weather: String,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
    /// `top` or `bottom`, when the backend classified it
    pub outfit_part: Option<String>,
    /// Hex colors extracted by the backend
    pub dominant_colors: Vec<String>,
    pub detected_by_ai: bool,
    pub created_at: Option<String>,
}

/// Wire shape of a wardrobe item before normalization.
#[derive(Debug, Deserialize)]
struct RawWardrobeItem {
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "super::deserialize_opt_id")]
    underscore_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    weather: Option<String>,
    #[serde(default)]
    weather_suitability: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, rename = "imageUrl")]
    image_url_camel: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    user_id: Option<String>,
    #[serde(default)]
    outfit_part: Option<String>,
    #[serde(default)]
    dominant_colors: Option<Vec<String>>,
    #[serde(default)]
    detected_by_ai: Option<bool>,
    #[serde(default)]
    created_at: Option<String>,
}

impl TryFrom<RawWardrobeItem> for WardrobeItem {
    type Error = String;

    fn try_from(raw: RawWardrobeItem) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.underscore_id)
            .ok_or_else(|| "wardrobe item is missing `id`".to_string())?;

        Ok(Self {
            id,
            category: raw.category.unwrap_or_default(),
            style: raw.style.unwrap_or_default(),
            weather: raw.weather.or(raw.weather_suitability).unwrap_or_default(),
            image_url: raw.image_url.or(raw.image_url_camel),
            user_id: raw.user_id,
            outfit_part: raw.outfit_part,
            dominant_colors: raw.dominant_colors.unwrap_or_default(),
            detected_by_ai: raw.detected_by_ai.unwrap_or(false),
            created_at: raw.created_at,
        })
    }
}

/// An image attached to a new wardrobe item.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Read an image from disk, guessing the MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            content_type: content_type_for(&extension).to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Fields of the add-item form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWardrobeItem {
    pub category: String,
    pub style: String,
    pub weather: String,
    pub image: Option<ImageUpload>,
}

impl NewWardrobeItem {
    pub fn new(
        category: impl Into<String>,
        style: impl Into<String>,
        weather: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            style: style.into(),
            weather: weather.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Build the multipart body expected by `POST /api/users/{id}/wardrobe`.
    pub fn to_form(&self) -> MultipartForm {
        let form = MultipartForm::new()
            .text("category", &self.category)
            .text("style", &self.style)
            .text("weather", &self.weather);

        match &self.image {
            Some(image) => form.file(FilePart {
                field: "image".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            }),
            None => form,
        }
    }
}

/// Client-side dashboard filter over a wardrobe list.
///
/// Every set criterion must match, compared case-insensitively. Empty strings
/// count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardrobeFilter {
    pub category: Option<String>,
    pub style: Option<String>,
    pub weather: Option<String>,
}

impl WardrobeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Number of criteria in effect.
    pub fn active_count(&self) -> usize {
        [&self.category, &self.style, &self.weather]
            .into_iter()
            .filter(|c| c.as_deref().is_some_and(|v| !v.is_empty()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn matches(&self, item: &WardrobeItem) -> bool {
        criterion_matches(&self.category, &item.category)
            && criterion_matches(&self.style, &item.style)
            && criterion_matches(&self.weather, &item.weather)
    }

    /// Items that pass the filter, in their original order.
    pub fn apply(&self, items: &[WardrobeItem]) -> Vec<WardrobeItem> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

fn criterion_matches(criterion: &Option<String>, value: &str) -> bool {
    match criterion.as_deref() {
        None | Some("") => true,
        Some(wanted) => wanted.to_lowercase() == value.to_lowercase(),
    }
}
