//! Error category classification.
//!
//! Categories let callers decide how to react to a failure (show a retry
//! affordance, send the user back to login, report a bug) without matching on
//! every concrete variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No response was received (connection refused, timeout).
    Network,

    /// Authentication failed or the session is gone.
    Auth,

    /// The backend answered with a 5xx status.
    Server,

    /// The backend rejected the request (4xx other than 401), or the
    /// response could not be understood.
    Client,

    /// Invalid client configuration, e.g. a malformed base URL.
    Configuration,
}

impl ErrorCategory {
    /// Whether a manual retry of the same request could plausibly succeed.
    ///
    /// The data layer never retries on its own; this only informs the UI.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the Closet backend is reachable and try again",
            ErrorCategory::Auth => "Sign in again",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::Client => "Check the request and try again",
            ErrorCategory::Configuration => "Check CLOSET_API_URL and the other CLOSET_* settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("Sign in"));
        assert!(ErrorCategory::Configuration.recovery_hint().contains("CLOSET_API_URL"));
    }
}
