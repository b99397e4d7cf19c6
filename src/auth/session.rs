//! Session state and lifecycle.
//!
//! [`SessionStore`] owns the current [`Session`] and its persisted copy. The
//! API client reads the token from it and calls [`SessionStore::expire_if`] when
//! the backend answers 401. [`SessionManager`] drives login, signup, logout
//! and the bootstrap from persisted credentials.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;

use super::credentials::Credentials;
use crate::api::AuthApi;
use crate::error::{AuthError, ClosetError, ClosetResult};
use crate::models::AuthResponse;
use crate::traits::CredentialsProvider;

/// Capacity of the session event channel. Slow receivers skip old events.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// The authenticated identity used to scope and sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self::new(resp.user_id, resp.token)
    }
}

/// Session changes, broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established by login, signup or bootstrap.
    SignedIn { user_id: String },
    /// The user logged out.
    SignedOut,
    /// The backend rejected the token; the user must sign in again.
    LoginRequired,
}

/// Holder of the current session.
pub struct SessionStore {
    session: RwLock<Option<Session>>,
    credentials: Arc<dyn CredentialsProvider>,
    events: broadcast::Sender<SessionEvent>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.current())
            .finish()
    }
}

impl SessionStore {
    /// Create an empty store persisting through `credentials`.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: RwLock::new(None),
            credentials,
            events,
        }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn user_id(&self) -> Option<String> {
        self.current().map(|s| s.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The current user id, or `NotAuthenticated`.
    pub fn require_user_id(&self) -> ClosetResult<String> {
        self.user_id()
            .ok_or_else(|| ClosetError::from(AuthError::NotAuthenticated))
    }

    /// Receive session events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Restore the session from persisted credentials.
    ///
    /// Both the token and the user id must be present. Storage errors are
    /// logged and leave the store signed out.
    pub async fn bootstrap(&self) -> Option<Session> {
        let stored = match self.credentials.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted credentials");
                return None;
            }
        };

        let session = stored.as_ref().and_then(Credentials::to_session)?;
        tracing::debug!(user_id = %session.user_id, "Restored persisted session");
        self.set(Some(session.clone()));
        self.emit(SessionEvent::SignedIn {
            user_id: session.user_id.clone(),
        });
        Some(session)
    }

    /// Install a freshly authenticated session and persist it.
    ///
    /// A persistence failure is logged; the in-memory session stands.
    pub(crate) async fn establish(&self, session: Session) {
        if let Err(e) = self
            .credentials
            .save(&Credentials::from_session(&session))
            .await
        {
            tracing::warn!(error = %e, "Failed to persist credentials");
        }

        tracing::info!(user_id = %session.user_id, "Signed in");
        let user_id = session.user_id.clone();
        self.set(Some(session));
        self.emit(SessionEvent::SignedIn { user_id });
    }

    /// Drop the session and its persisted copy. Never fails.
    pub async fn clear(&self) {
        self.set(None);
        if let Err(e) = self.credentials.clear().await {
            tracing::warn!(error = %e, "Failed to clear persisted credentials");
        }
        tracing::info!("Signed out");
        self.emit(SessionEvent::SignedOut);
    }

    /// React to a 401 for a request sent with `sent_token`.
    ///
    /// The session is forgotten only while it still holds that token; a late
    /// 401 for a token that has since been replaced is ignored.
    pub(crate) async fn expire_if(&self, sent_token: Option<&str>) {
        let expired = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            match session.as_ref() {
                Some(current) if Some(current.token.as_str()) != sent_token => {
                    tracing::debug!(
                        user_id = %current.user_id,
                        "Ignoring 401 for a token that is no longer current"
                    );
                    return;
                }
                _ => session.take(),
            }
        };

        if let Err(e) = self.credentials.clear().await {
            tracing::warn!(error = %e, "Failed to clear persisted credentials");
        }
        if expired.is_some() {
            tracing::warn!("Session rejected by backend, login required");
        }
        self.emit(SessionEvent::LoginRequired);
    }

    fn set(&self, session: Option<Session>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn emit(&self, event: SessionEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }
}

/// Drives the login, signup, logout and bootstrap flows.
pub struct SessionManager {
    api: AuthApi,
    store: Arc<SessionStore>,
    dev_fallback: bool,
}

impl SessionManager {
    pub fn new(api: AuthApi, store: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            dev_fallback: false,
        }
    }

    /// Synthesize sessions locally instead of calling the backend.
    pub fn with_dev_fallback(mut self, enabled: bool) -> Self {
        self.dev_fallback = enabled;
        self
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn is_dev_fallback(&self) -> bool {
        self.dev_fallback
    }

    /// Restore a persisted session, if any.
    pub async fn bootstrap(&self) -> Option<Session> {
        self.store.bootstrap().await
    }

    pub async fn login(&self, username: &str, password: &str) -> ClosetResult<Session> {
        if self.dev_fallback {
            return Ok(self.dev_session(username).await);
        }

        let resp = self
            .api
            .login(username, password)
            .await
            .map_err(|e| AuthError::LoginFailed {
                status: e.status(),
                message: e.user_message(),
            })?;
        Ok(self.install(resp).await)
    }

    pub async fn signup(&self, username: &str, password: &str) -> ClosetResult<Session> {
        if self.dev_fallback {
            return Ok(self.dev_session(username).await);
        }

        let resp = self
            .api
            .signup(username, password)
            .await
            .map_err(|e| AuthError::SignupFailed {
                status: e.status(),
                message: e.user_message(),
            })?;
        Ok(self.install(resp).await)
    }

    /// Sign out locally. Never fails.
    pub async fn logout(&self) {
        self.store.clear().await;
    }

    async fn install(&self, resp: AuthResponse) -> Session {
        let session = Session::from(resp);
        self.store.establish(session.clone()).await;
        session
    }

    async fn dev_session(&self, username: &str) -> Session {
        tracing::info!(username, "Dev fallback: synthesizing local session");
        let session = Session::new(
            format!("dev-user-{}", username),
            format!("dev-token-{}", chrono::Utc::now().timestamp_millis()),
        );
        self.store.establish(session.clone()).await;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryCredentials;

    fn store_with(creds: InMemoryCredentials) -> SessionStore {
        SessionStore::new(Arc::new(creds))
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let s = Session::new("u1", "secret-token");
        let dbg = format!("{:?}", s);
        assert!(dbg.contains("u1"));
        assert!(!dbg.contains("secret-token"));
    }

    #[tokio::test]
    async fn test_bootstrap_requires_both_fields() {
        let creds = InMemoryCredentials::with_credentials(Credentials {
            token: Some("t".to_string()),
            user_id: None,
        });
        let store = store_with(creds);
        assert!(store.bootstrap().await.is_none());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_session_and_emits() {
        let creds = InMemoryCredentials::with_credentials(Credentials {
            token: Some("t".to_string()),
            user_id: Some("u".to_string()),
        });
        let store = store_with(creds);
        let mut events = store.subscribe();

        let session = store.bootstrap().await.unwrap();
        assert_eq!(session, Session::new("u", "t"));
        assert_eq!(store.token().as_deref(), Some("t"));
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::SignedIn {
                user_id: "u".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_bootstrap_load_failure_is_not_fatal() {
        let creds = InMemoryCredentials::new();
        creds.set_load_should_fail(true);
        let store = store_with(creds);
        assert!(store.bootstrap().await.is_none());
    }

    #[tokio::test]
    async fn test_establish_persists_and_survives_save_failure() {
        let creds = InMemoryCredentials::new();
        let store = store_with(creds.clone());
        store.establish(Session::new("u1", "t1")).await;
        assert_eq!(
            creds.get_credentials().unwrap().token.as_deref(),
            Some("t1")
        );

        creds.set_save_should_fail(true);
        store.establish(Session::new("u2", "t2")).await;
        assert_eq!(store.user_id().as_deref(), Some("u2"));
        assert_eq!(
            creds.get_credentials().unwrap().user_id.as_deref(),
            Some("u1")
        );
    }

    #[tokio::test]
    async fn test_clear_never_fails() {
        let creds = InMemoryCredentials::new();
        let store = store_with(creds.clone());
        store.establish(Session::new("u", "t")).await;
        creds.set_clear_should_fail(true);

        let mut events = store.subscribe();
        store.clear().await;
        assert!(!store.is_authenticated());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_expire_clears_everything_and_requests_login() {
        let creds = InMemoryCredentials::new();
        let store = store_with(creds.clone());
        store.establish(Session::new("u", "t")).await;
        let mut events = store.subscribe();

        store.expire_if(Some("t")).await;
        assert!(store.current().is_none());
        assert!(creds.get_credentials().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoginRequired);
        assert!(matches!(
            store.require_user_id(),
            Err(ClosetError::Auth(AuthError::NotAuthenticated))
        ));
    }

    #[tokio::test]
    async fn test_expire_ignores_replaced_token() {
        let creds = InMemoryCredentials::new();
        let store = store_with(creds.clone());
        store.establish(Session::new("u2", "new-token")).await;
        let mut events = store.subscribe();

        store.expire_if(Some("old-token")).await;
        assert_eq!(store.token().as_deref(), Some("new-token"));
        assert_eq!(
            creds.get_credentials().unwrap().token.as_deref(),
            Some("new-token")
        );
        assert!(events.try_recv().is_err());

        store.expire_if(None).await;
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_expire_without_session_still_requests_login() {
        let store = store_with(InMemoryCredentials::new());
        let mut events = store.subscribe();
        store.expire_if(Some("gone")).await;
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoginRequired);
    }
}
