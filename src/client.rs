//! The assembled client.

use std::sync::Arc;

use crate::adapters::{FileCredentialsProvider, ReqwestHttpClient};
use crate::api::{ApiClient, AuthApi, FeedbackApi, OutfitApi, WardrobeApi, WeatherApi};
use crate::auth::{Session, SessionManager, SessionStore};
use crate::cache::QueryClient;
use crate::config::ClientConfig;
use crate::error::ClosetResult;
use crate::queries::{FeedbackMutation, OutfitQueries, WardrobeQueries, WeatherQuery};
use crate::traits::{CredentialsError, CredentialsProvider, HttpClient};

/// Session, HTTP client, resource clients and hooks wired together.
///
/// Every part shares one [`SessionStore`] and one [`QueryClient`].
///
/// # Example
///
/// ```ignore
/// let client = ClosetClient::from_config(ClientConfig::from_env())?;
/// client.bootstrap().await;
/// let items = client.wardrobe().fetch().await?;
/// ```
pub struct ClosetClient {
    config: ClientConfig,
    api: ApiClient,
    session: SessionManager,
    cache: QueryClient,
    wardrobe: WardrobeQueries,
    weather: WeatherQuery,
    outfits: OutfitQueries,
    feedback: FeedbackMutation,
}

impl std::fmt::Debug for ClosetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosetClient")
            .field("config", &self.config)
            .field("session", self.session.store())
            .finish()
    }
}

impl ClosetClient {
    /// Production wiring: reqwest transport and a credentials file.
    pub fn from_config(config: ClientConfig) -> Result<Self, CredentialsError> {
        let credentials = match &config.credentials_path {
            Some(path) => FileCredentialsProvider::with_path(path),
            None => FileCredentialsProvider::new()?,
        };
        tracing::debug!(
            api_url = %config.api_url,
            credentials = %credentials.credentials_path().display(),
            "Building client"
        );
        Ok(Self::with_adapters(
            config,
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(credentials),
        ))
    }

    /// Wire the client over explicit transport and storage adapters.
    pub fn with_adapters(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        let store = Arc::new(SessionStore::new(credentials));
        let api = ApiClient::new(config.api_url.clone(), http, store.clone());
        let cache = QueryClient::new();

        let session = SessionManager::new(AuthApi::new(api.clone()), store.clone())
            .with_dev_fallback(config.dev_mode);
        let wardrobe = WardrobeQueries::new(WardrobeApi::new(api.clone()), cache.clone(), store.clone());
        let weather = WeatherQuery::new(WeatherApi::new(api.clone()), cache.clone());
        let outfits = OutfitQueries::new(OutfitApi::new(api.clone()), cache.clone(), store.clone());
        let feedback = FeedbackMutation::new(FeedbackApi::new(api.clone()), store);

        Self {
            config,
            api,
            session,
            cache,
            wardrobe,
            weather,
            outfits,
            feedback,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.session.store()
    }

    pub fn auth(&self) -> &SessionManager {
        &self.session
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn wardrobe(&self) -> &WardrobeQueries {
        &self.wardrobe
    }

    pub fn weather(&self) -> &WeatherQuery {
        &self.weather
    }

    pub fn outfits(&self) -> &OutfitQueries {
        &self.outfits
    }

    pub fn feedback(&self) -> &FeedbackMutation {
        &self.feedback
    }

    /// Restore the persisted session, if any.
    pub async fn bootstrap(&self) -> Option<Session> {
        self.session.bootstrap().await
    }

    pub async fn login(&self, username: &str, password: &str) -> ClosetResult<Session> {
        let session = self.session.login(username, password).await?;
        self.cache.clear();
        Ok(session)
    }

    pub async fn signup(&self, username: &str, password: &str) -> ClosetResult<Session> {
        let session = self.session.signup(username, password).await?;
        self.cache.clear();
        Ok(session)
    }

    /// Sign out and drop everything cached for the previous user.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.cache.clear();
    }
}
