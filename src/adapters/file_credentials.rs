//! File-based credentials provider adapter.
//!
//! Wraps [`CredentialsManager`] so the session holder can persist through
//! the [`CredentialsProvider`] trait.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// File-based credentials provider.
///
/// Credentials are stored in `~/.closet/credentials.json` unless a path is
/// given explicitly.
///
/// # Example
///
/// ```ignore
/// use closet::adapters::FileCredentialsProvider;
/// use closet::traits::CredentialsProvider;
///
/// let provider = FileCredentialsProvider::new()?;
/// if let Some(creds) = provider.load().await? {
///     println!("stored user: {:?}", creds.user_id);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
}

impl FileCredentialsProvider {
    /// Create a provider for the default location.
    ///
    /// # Returns
    /// The provider, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new().map(|manager| Self { manager })
    }

    /// Create a provider for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            manager: CredentialsManager::with_path(path),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        // A missing file loads as empty credentials
        let creds = self.manager.load()?;
        if creds.is_empty() {
            Ok(None)
        } else {
            Ok(Some(creds))
        }
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        self.manager.save(creds)
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.manager.clear()
    }
}
