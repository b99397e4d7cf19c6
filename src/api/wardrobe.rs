//! Wardrobe item endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::segment;
use crate::error::ClosetResult;
use crate::models::{NewWardrobeItem, WardrobeItem};

#[derive(Debug, Clone)]
pub struct WardrobeApi {
    client: ApiClient,
}

impl WardrobeApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn collection(user_id: &str) -> String {
        format!("/api/users/{}/wardrobe", segment(user_id))
    }

    fn item(user_id: &str, item_id: &str) -> String {
        format!("{}/{}", Self::collection(user_id), segment(item_id))
    }

    /// `GET /api/users/{user_id}/wardrobe`. A `null` body reads as empty.
    pub async fn list(&self, user_id: &str) -> ClosetResult<Vec<WardrobeItem>> {
        let value: Value = self.client.get_json(&Self::collection(user_id)).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /api/users/{user_id}/wardrobe/{item_id}`
    pub async fn get(&self, user_id: &str, item_id: &str) -> ClosetResult<WardrobeItem> {
        self.client.get_json(&Self::item(user_id, item_id)).await
    }

    /// `POST /api/users/{user_id}/wardrobe` as multipart form data.
    pub async fn add(&self, user_id: &str, item: &NewWardrobeItem) -> ClosetResult<WardrobeItem> {
        self.client
            .post_multipart(&Self::collection(user_id), item.to_form())
            .await
    }

    /// `DELETE /api/users/{user_id}/wardrobe/{item_id}`
    pub async fn delete(&self, user_id: &str, item_id: &str) -> ClosetResult<()> {
        self.client.delete(&Self::item(user_id, item_id)).await?;
        Ok(())
    }
}
