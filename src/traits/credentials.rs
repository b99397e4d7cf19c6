//! Credentials storage trait abstraction.
//!
//! The session holder persists the token and user id through this trait so
//! that production code writes a JSON file while tests stay in memory.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::auth::Credentials;

/// Credentials storage errors.
#[derive(Debug, Clone)]
pub enum CredentialsError {
    /// Reading or writing the backing file failed
    Io { path: PathBuf, message: String },
    /// Stored data could not be (de)serialized
    Serialization(String),
    /// The home directory could not be determined
    NoHomeDirectory,
    /// Backend-specific failure (used by test doubles)
    Backend(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::Io { path, message } => {
                write!(f, "Credentials IO error at {}: {}", path.display(), message)
            }
            CredentialsError::Serialization(msg) => {
                write!(f, "Credentials serialization error: {}", msg)
            }
            CredentialsError::NoHomeDirectory => {
                write!(f, "Could not determine the home directory")
            }
            CredentialsError::Backend(msg) => write!(f, "Credentials backend error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Trait for durable key-value storage of the session credentials.
///
/// # Returns
/// - `load` yields `Ok(None)` when nothing is stored
/// - `clear` succeeds when nothing is stored
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load stored credentials, if any.
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Replace stored credentials.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    /// Remove stored credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;
}
