//! Unified error type for the Closet client.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;

/// Unified error type for the Closet client.
///
/// `ClosetError` is `Clone` because a single in-flight fetch result is handed
/// to every subscriber of a cache key.
#[derive(Debug, Clone, PartialEq)]
pub enum ClosetError {
    /// Transport failures and non-2xx responses.
    Network(NetworkError),

    /// Authentication and session errors.
    Auth(AuthError),
}

impl ClosetError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClosetError::Network(NetworkError::HttpStatus { status, .. }) => match *status {
                401 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            ClosetError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            ClosetError::Network(NetworkError::InvalidRequest { .. }) => {
                ErrorCategory::Configuration
            }
            ClosetError::Network(_) => ErrorCategory::Network,
            ClosetError::Auth(_) => ErrorCategory::Auth,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClosetError::Network(err) => err.is_retryable(),
            ClosetError::Auth(_) => false,
        }
    }

    /// Status code of the backend response behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClosetError::Network(err) => err.status(),
            ClosetError::Auth(err) => err.status(),
        }
    }

    /// True for responses where the backend rejected the input (400/422).
    ///
    /// Input validation is left to the backend; this only recognises its
    /// verdict.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ClosetError::Network(NetworkError::HttpStatus {
                status: 400 | 422,
                ..
            })
        )
    }

    /// True for 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404) && matches!(self, ClosetError::Network(_))
    }

    /// Check if this error requires re-authentication.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ClosetError::Auth(err) => err.requires_reauth(),
            ClosetError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            ClosetError::Network(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClosetError::Network(err) => err.user_message(),
            ClosetError::Auth(err) => err.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClosetError::Network(err) => err.error_code(),
            ClosetError::Auth(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        ClosetError::Network(NetworkError::InvalidResponse {
            message: message.into(),
        })
    }
}

impl fmt::Display for ClosetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosetError::Network(err) => write!(f, "{}", err),
            ClosetError::Auth(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClosetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClosetError::Network(err) => Some(err),
            ClosetError::Auth(err) => Some(err),
        }
    }
}

impl From<NetworkError> for ClosetError {
    fn from(err: NetworkError) -> Self {
        ClosetError::Network(err)
    }
}

impl From<AuthError> for ClosetError {
    fn from(err: AuthError) -> Self {
        ClosetError::Auth(err)
    }
}

impl From<serde_json::Error> for ClosetError {
    fn from(err: serde_json::Error) -> Self {
        ClosetError::invalid_response(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> ClosetError {
        NetworkError::HttpStatus {
            status,
            message: String::new(),
        }
        .into()
    }

    #[test]
    fn test_category_by_status() {
        assert_eq!(status(401).category(), ErrorCategory::Auth);
        assert_eq!(status(403).category(), ErrorCategory::Client);
        assert_eq!(status(502).category(), ErrorCategory::Server);
        assert_eq!(
            ClosetError::from(NetworkError::Cancelled).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            ClosetError::from(AuthError::NotAuthenticated).category(),
            ErrorCategory::Auth
        );
    }

    #[test]
    fn test_requires_reauth() {
        assert!(status(401).requires_reauth());
        assert!(!status(403).requires_reauth());
        assert!(ClosetError::from(AuthError::SessionExpired).requires_reauth());
    }

    #[test]
    fn test_validation_and_not_found() {
        assert!(status(400).is_validation_error());
        assert!(status(422).is_validation_error());
        assert!(!status(409).is_validation_error());
        assert!(status(404).is_not_found());
        assert!(!status(400).is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClosetError = json_err.into();
        assert!(matches!(
            err,
            ClosetError::Network(NetworkError::InvalidResponse { .. })
        ));
        assert_eq!(err.error_code(), "E_NET_INVALID");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = ClosetError::from(AuthError::NotAuthenticated);
        assert!(err.source().is_some());
    }
}
