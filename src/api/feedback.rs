//! Outfit feedback endpoint.

use serde_json::Value;

use super::client::ApiClient;
use super::segment;
use crate::error::ClosetResult;
use crate::models::{FeedbackReaction, FeedbackReceipt, FeedbackRequest};

#[derive(Debug, Clone)]
pub struct FeedbackApi {
    client: ApiClient,
}

impl FeedbackApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/users/{user_id}/feedback`
    pub async fn submit(
        &self,
        user_id: &str,
        outfit_id: &str,
        feedback: FeedbackReaction,
    ) -> ClosetResult<FeedbackReceipt> {
        let path = format!("/api/users/{}/feedback", segment(user_id));
        let value: Value = self
            .client
            .post_json(&path, &FeedbackRequest { outfit_id, feedback })
            .await?;
        if value.is_null() {
            return Ok(FeedbackReceipt::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}
