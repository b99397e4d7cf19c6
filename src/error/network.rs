//! Network-related error types.
//!
//! Covers both "no response received" failures and non-2xx responses.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out in the transport.
    Timeout { url: String, message: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    InvalidResponse { message: String },

    /// The request could not be built (bad URL, unserializable body).
    InvalidRequest { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic transport error.
    Other { message: String },
}

impl NetworkError {
    /// Status code of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no HTTP response was received at all.
    pub fn is_no_response(&self) -> bool {
        matches!(
            self,
            NetworkError::ConnectionFailed { .. }
                | NetworkError::Timeout { .. }
                | NetworkError::Cancelled
                | NetworkError::Other { .. }
        )
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::InvalidRequest { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For status errors the backend's own message wins when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the Closet server. Please check your connection.".to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            NetworkError::HttpStatus { status, message } if !message.is_empty() => {
                match *status {
                    500..=599 => {
                        "The server is experiencing issues. Please try again later.".to_string()
                    }
                    _ => message.clone(),
                }
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                422 => "The server could not process this request.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!(
                    "The server returned an error (HTTP {}). Please try again.",
                    status
                ),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            NetworkError::InvalidRequest { message } => format!("Invalid request: {}", message),
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::InvalidRequest { .. } => "E_NET_REQUEST",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url, message } => {
                write!(f, "Request to '{}' timed out: {}", url, message)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport failure for the given URL.
pub fn classify_transport_error(err: &HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Timeout(message) => NetworkError::Timeout {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Cancelled => NetworkError::Cancelled,
        HttpError::InvalidUrl(message) => NetworkError::InvalidRequest {
            message: format!("invalid URL '{}': {}", url, message),
        },
        HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other {
            message: message.clone(),
        },
    }
}

/// Pull a human-readable message out of an error response body.
///
/// The backend answers errors with `{"message": "..."}`; anything else is
/// returned trimmed and truncated.
pub fn extract_error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error", "msg"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    text.chars().take(200).collect()
}
