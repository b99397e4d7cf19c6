//! Outfit generation and the saved-outfit list.

use std::sync::Arc;

use crate::api::OutfitApi;
use crate::auth::SessionStore;
use crate::cache::{CacheEntry, QueryClient, QueryKey, QueryPolicy};
use crate::error::ClosetResult;
use crate::models::{Outfit, SaveConfirmation, WeatherSnapshot};

/// `["outfits", "saved", user_id]`
pub fn saved_outfits_key(user_id: &str) -> QueryKey {
    QueryKey::new("outfits").with("saved").with(user_id)
}

#[derive(Debug, Clone)]
pub struct OutfitQueries {
    api: OutfitApi,
    cache: QueryClient,
    session: Arc<SessionStore>,
    policy: QueryPolicy,
}

impl OutfitQueries {
    pub fn new(api: OutfitApi, cache: QueryClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            cache,
            session,
            policy: QueryPolicy::default(),
        }
    }

    /// Ask the backend for an outfit. Nothing is cached.
    pub async fn generate(
        &self,
        occasion: &str,
        weather: &WeatherSnapshot,
    ) -> ClosetResult<Outfit> {
        let user_id = self.session.require_user_id()?;
        let outfit = self.api.generate(&user_id, occasion, weather).await?;
        tracing::info!(outfit_id = %outfit.id, occasion, "Generated outfit");
        Ok(outfit)
    }

    pub fn saved(&self) -> CacheEntry<Vec<Outfit>> {
        let Some(user_id) = self.session.user_id() else {
            return CacheEntry::idle(QueryKey::new("outfits").with("saved"));
        };
        let api = self.api.clone();
        let key = saved_outfits_key(&user_id);
        self.cache
            .query(&key, self.policy, move || async move { api.saved(&user_id).await })
    }

    pub async fn fetch_saved(&self) -> ClosetResult<Vec<Outfit>> {
        let user_id = self.session.require_user_id()?;
        let api = self.api.clone();
        let key = saved_outfits_key(&user_id);
        self.cache
            .fetch(&key, self.policy, move || async move { api.saved(&user_id).await })
            .await
    }

    pub async fn refetch_saved(&self) -> ClosetResult<Vec<Outfit>> {
        let user_id = self.session.require_user_id()?;
        let api = self.api.clone();
        let key = saved_outfits_key(&user_id);
        self.cache
            .refetch(&key, self.policy, move || async move { api.saved(&user_id).await })
            .await
    }

    /// Save an outfit, then invalidate the saved list.
    pub async fn save(&self, outfit_id: &str) -> ClosetResult<SaveConfirmation> {
        let user_id = self.session.require_user_id()?;
        let confirmation = self.api.save(&user_id, outfit_id).await?;
        tracing::info!(outfit_id, "Saved outfit");
        self.cache.invalidate(&saved_outfits_key(&user_id));
        Ok(confirmation)
    }

    /// Drop an outfit from the cached saved list only; the backend keeps it.
    /// Returns whether a cached list was edited.
    pub fn remove_saved_locally(&self, outfit_id: &str) -> bool {
        let Some(user_id) = self.session.user_id() else {
            return false;
        };
        self.cache
            .update_query_data::<Vec<Outfit>, _>(&saved_outfits_key(&user_id), |outfits| {
                outfits.iter().filter(|o| o.id != outfit_id).cloned().collect()
            })
    }
}
