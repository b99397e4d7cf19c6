//! Login and signup payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/login` and `POST /api/signup`.
#[derive(Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for AuthRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful auth response. The user id arrives as `userId` or `user_id`.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAuthResponse")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub username: Option<String>,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Deserialize)]
struct RawAuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "userId", deserialize_with = "super::deserialize_opt_id")]
    user_id_camel: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    user_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl TryFrom<RawAuthResponse> for AuthResponse {
    type Error = String;

    fn try_from(raw: RawAuthResponse) -> Result<Self, Self::Error> {
        let token = raw
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "auth response is missing `token`".to_string())?;
        let user_id = raw
            .user_id_camel
            .or(raw.user_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "auth response is missing `userId`".to_string())?;

        Ok(Self {
            token,
            user_id,
            username: raw.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_user_id() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "token": "t-1",
            "userId": "u-1",
            "username": "alice"
        }))
        .unwrap();
        assert_eq!(resp.token, "t-1");
        assert_eq!(resp.user_id, "u-1");
        assert_eq!(resp.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_snake_case_user_id() {
        let resp: AuthResponse =
            serde_json::from_value(json!({"token": "t", "user_id": "u"})).unwrap();
        assert_eq!(resp.user_id, "u");
    }

    #[test]
    fn test_missing_token_or_user_is_rejected() {
        assert!(serde_json::from_value::<AuthResponse>(json!({"userId": "u"})).is_err());
        assert!(serde_json::from_value::<AuthResponse>(json!({"token": "t"})).is_err());
        assert!(
            serde_json::from_value::<AuthResponse>(json!({"token": "", "userId": "u"})).is_err()
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let req = AuthRequest {
            username: "alice",
            password: "hunter2",
        };
        assert!(!format!("{:?}", req).contains("hunter2"));
    }
}
