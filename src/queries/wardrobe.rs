//! Wardrobe list and item mutations.

use std::sync::Arc;

use crate::api::WardrobeApi;
use crate::auth::SessionStore;
use crate::cache::{CacheEntry, QueryClient, QueryKey, QueryPolicy};
use crate::error::ClosetResult;
use crate::models::{NewWardrobeItem, WardrobeFilter, WardrobeItem};

/// `["wardrobe", user_id]`
pub fn wardrobe_key(user_id: &str) -> QueryKey {
    QueryKey::new("wardrobe").with(user_id)
}

/// `["wardrobe", user_id, item_id]`
pub fn wardrobe_item_key(user_id: &str, item_id: &str) -> QueryKey {
    wardrobe_key(user_id).with(item_id)
}

#[derive(Debug, Clone)]
pub struct WardrobeQueries {
    api: WardrobeApi,
    cache: QueryClient,
    session: Arc<SessionStore>,
    policy: QueryPolicy,
}

impl WardrobeQueries {
    pub fn new(api: WardrobeApi, cache: QueryClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            cache,
            session,
            policy: QueryPolicy::default(),
        }
    }

    /// Current list entry; starts a fetch when idle or stale.
    pub fn current(&self) -> CacheEntry<Vec<WardrobeItem>> {
        let Some(user_id) = self.session.user_id() else {
            return CacheEntry::idle(QueryKey::new("wardrobe"));
        };
        let api = self.api.clone();
        let key = wardrobe_key(&user_id);
        self.cache
            .query(&key, self.policy, move || async move { api.list(&user_id).await })
    }

    pub async fn fetch(&self) -> ClosetResult<Vec<WardrobeItem>> {
        let user_id = self.session.require_user_id()?;
        let api = self.api.clone();
        let key = wardrobe_key(&user_id);
        self.cache
            .fetch(&key, self.policy, move || async move { api.list(&user_id).await })
            .await
    }

    pub async fn refetch(&self) -> ClosetResult<Vec<WardrobeItem>> {
        let user_id = self.session.require_user_id()?;
        let api = self.api.clone();
        let key = wardrobe_key(&user_id);
        self.cache
            .refetch(&key, self.policy, move || async move { api.list(&user_id).await })
            .await
    }

    /// The wardrobe narrowed by the dashboard filter.
    pub async fn filtered(&self, filter: &WardrobeFilter) -> ClosetResult<Vec<WardrobeItem>> {
        let items = self.fetch().await?;
        Ok(filter.apply(&items))
    }

    /// One item, cached under `["wardrobe", user_id, item_id]`.
    pub async fn item(&self, item_id: &str) -> ClosetResult<WardrobeItem> {
        let user_id = self.session.require_user_id()?;
        let api = self.api.clone();
        let key = wardrobe_item_key(&user_id, item_id);
        let item_id = item_id.to_string();
        self.cache
            .fetch(&key, self.policy, move || async move {
                api.get(&user_id, &item_id).await
            })
            .await
    }

    /// Upload a new item, then invalidate the wardrobe.
    pub async fn add_item(&self, item: &NewWardrobeItem) -> ClosetResult<WardrobeItem> {
        let user_id = self.session.require_user_id()?;
        let created = self.api.add(&user_id, item).await?;
        tracing::info!(item_id = %created.id, category = %created.category, "Added wardrobe item");
        self.cache.invalidate_matching(&wardrobe_key(&user_id));
        Ok(created)
    }

    /// Delete an item, drop it from the cached list, then invalidate.
    pub async fn delete_item(&self, item_id: &str) -> ClosetResult<()> {
        let user_id = self.session.require_user_id()?;
        self.api.delete(&user_id, item_id).await?;
        tracing::info!(item_id, "Deleted wardrobe item");

        let key = wardrobe_key(&user_id);
        self.cache
            .update_query_data::<Vec<WardrobeItem>, _>(&key, |items| {
                items.iter().filter(|i| i.id != item_id).cloned().collect()
            });
        self.cache.remove(&wardrobe_item_key(&user_id, item_id));
        self.cache.invalidate_matching(&key);
        Ok(())
    }
}
