//! Outfit feedback submission.

use std::sync::Arc;

use crate::api::FeedbackApi;
use crate::auth::SessionStore;
use crate::error::ClosetResult;
use crate::models::{FeedbackReaction, FeedbackReceipt};

/// Records like/dislike reactions. Duplicate submissions are not guarded
/// here.
#[derive(Debug, Clone)]
pub struct FeedbackMutation {
    api: FeedbackApi,
    session: Arc<SessionStore>,
}

impl FeedbackMutation {
    pub fn new(api: FeedbackApi, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn submit(
        &self,
        outfit_id: &str,
        reaction: FeedbackReaction,
    ) -> ClosetResult<FeedbackReceipt> {
        let user_id = self.session.require_user_id()?;
        let receipt = self.api.submit(&user_id, outfit_id, reaction).await?;
        tracing::info!(outfit_id, %reaction, "Submitted feedback");
        Ok(receipt)
    }
}
