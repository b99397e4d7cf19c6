//! Login and signup endpoints.

use super::client::ApiClient;
use crate::error::ClosetResult;
use crate::models::{AuthRequest, AuthResponse};

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/login`
    pub async fn login(&self, username: &str, password: &str) -> ClosetResult<AuthResponse> {
        self.client
            .post_json("/api/login", &AuthRequest { username, password })
            .await
    }

    /// `POST /api/signup`
    pub async fn signup(&self, username: &str, password: &str) -> ClosetResult<AuthResponse> {
        self.client
            .post_json("/api/signup", &AuthRequest { username, password })
            .await
    }
}
