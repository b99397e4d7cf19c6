//! Outfit generation and saved-outfit endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::segment;
use crate::error::ClosetResult;
use crate::models::{
    parse_outfit_list, GenerateOutfitRequest, Outfit, SaveConfirmation, SaveOutfitRequest,
    WeatherSnapshot,
};

#[derive(Debug, Clone)]
pub struct OutfitApi {
    client: ApiClient,
}

impl OutfitApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn saved_path(user_id: &str) -> String {
        format!("/api/users/{}/outfits/saved", segment(user_id))
    }

    /// `POST /api/users/{user_id}/outfit/generate`
    pub async fn generate(
        &self,
        user_id: &str,
        occasion: &str,
        weather: &WeatherSnapshot,
    ) -> ClosetResult<Outfit> {
        let path = format!("/api/users/{}/outfit/generate", segment(user_id));
        self.client
            .post_json(&path, &GenerateOutfitRequest { occasion, weather })
            .await
    }

    /// `GET /api/users/{user_id}/outfits/saved`, as a bare array or wrapped
    /// in `{"outfits": [...]}`.
    pub async fn saved(&self, user_id: &str) -> ClosetResult<Vec<Outfit>> {
        let value: Value = self.client.get_json(&Self::saved_path(user_id)).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(parse_outfit_list(value)?)
    }

    /// `POST /api/users/{user_id}/outfits/saved`
    pub async fn save(&self, user_id: &str, outfit_id: &str) -> ClosetResult<SaveConfirmation> {
        let value: Value = self
            .client
            .post_json(&Self::saved_path(user_id), &SaveOutfitRequest { outfit_id })
            .await?;
        if value.is_null() {
            return Ok(SaveConfirmation::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::auth::SessionStore;
    use crate::traits::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn api(http: &MockHttpClient) -> OutfitApi {
        let session = Arc::new(SessionStore::new(Arc::new(InMemoryCredentials::new())));
        OutfitApi::new(ApiClient::new("http://b", Arc::new(http.clone()), session))
    }

    fn weather() -> WeatherSnapshot {
        serde_json::from_value(json!({"temperature": 20, "condition": "Clear"})).unwrap()
    }

    #[tokio::test]
    async fn test_generate_sends_occasion_and_weather() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://b/api/users/u1/outfit/generate",
            MockResponse::json(
                200,
                json!({
                    "id": "o1",
                    "outfit_id": "o1",
                    "top": {"id": "t", "category": "shirt"},
                    "bottom": {"id": "b", "category": "shorts"}
                }),
            ),
        );

        let outfit = api(&http).generate("u1", "gym", &weather()).await.unwrap();
        assert!(outfit.is_complete());

        let body = http.last_request().unwrap().json_body().unwrap();
        assert_eq!(body["occasion"], "gym");
        assert_eq!(body["weather"]["temperature"], 20.0);
    }

    #[tokio::test]
    async fn test_saved_accepts_wrapped_list() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://b/api/users/u1/outfits/saved",
            MockResponse::json(200, json!({"outfits": [{"outfit_id": "o9"}]})),
        );
        let saved = api(&http).saved("u1").await.unwrap();
        assert_eq!(saved[0].id, "o9");
    }

    #[tokio::test]
    async fn test_save_posts_outfit_id() {
        let http = MockHttpClient::new();
        http.set_method_response(
            Method::Post,
            "http://b/api/users/u1/outfits/saved",
            MockResponse::json(200, json!({"message": "Outfit saved successfully"})),
        );
        let confirmation = api(&http).save("u1", "o1").await.unwrap();
        assert_eq!(
            confirmation.message.as_deref(),
            Some("Outfit saved successfully")
        );
        assert_eq!(
            http.last_request().unwrap().json_body(),
            Some(json!({"outfit_id": "o1"}))
        );
    }
}
