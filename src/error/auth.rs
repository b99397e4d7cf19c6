//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The login call failed. `status` is set when the backend answered.
    LoginFailed { status: Option<u16>, message: String },

    /// The signup call failed. `status` is set when the backend answered.
    SignupFailed { status: Option<u16>, message: String },

    /// A user-scoped operation was attempted without a session.
    NotAuthenticated,

    /// The backend rejected the session token (401).
    SessionExpired,
}

impl AuthError {
    /// Check if the user has to sign in (again) to make progress.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::NotAuthenticated | AuthError::SessionExpired)
    }

    /// Status code reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::LoginFailed { status, .. } | AuthError::SignupFailed { status, .. } => {
                *status
            }
            AuthError::SessionExpired => Some(401),
            AuthError::NotAuthenticated => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::LoginFailed { message, .. } if !message.is_empty() => message.clone(),
            AuthError::LoginFailed { .. } => "Login failed. Please try again.".to_string(),
            AuthError::SignupFailed { message, .. } if !message.is_empty() => message.clone(),
            AuthError::SignupFailed { .. } => "Signup failed. Please try again.".to_string(),
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::LoginFailed { .. } => "E_AUTH_LOGIN",
            AuthError::SignupFailed { .. } => "E_AUTH_SIGNUP",
            AuthError::NotAuthenticated => "E_AUTH_NONE",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::LoginFailed { status, message } => match status {
                Some(status) => write!(f, "Login failed (HTTP {}): {}", status, message),
                None => write!(f, "Login failed: {}", message),
            },
            AuthError::SignupFailed { status, message } => match status {
                Some(status) => write!(f, "Signup failed (HTTP {}): {}", status, message),
                None => write!(f, "Signup failed: {}", message),
            },
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::SessionExpired => write!(f, "Session expired"),
        }
    }
}

impl std::error::Error for AuthError {}
