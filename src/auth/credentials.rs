//! Credentials storage for the Closet client.
//!
//! The token and user id are persisted as pretty JSON, by default in
//! `~/.closet/credentials.json`, so a later process can bootstrap its session
//! without logging in again.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::session::Session;
use crate::traits::CredentialsError;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".closet";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Persisted form of a session.
///
/// Both fields are optional on disk; a session is only restored when both are
/// present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token issued by the backend.
    pub token: Option<String>,
    /// The authenticated user's ID.
    pub user_id: Option<String>,
}

impl Credentials {
    /// Build credentials from an established session.
    pub fn from_session(session: &Session) -> Self {
        Self {
            token: Some(session.token.clone()),
            user_id: Some(session.user_id.clone()),
        }
    }

    /// Check whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user_id.is_none()
    }

    /// Turn the stored pair back into a session.
    ///
    /// Returns `None` unless both the token and the user id are present and
    /// non-empty.
    pub fn to_session(&self) -> Option<Session> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let user_id = self.user_id.as_deref().filter(|u| !u.is_empty())?;
        Some(Session::new(user_id, token))
    }
}

/// Reads and writes the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for the default location under the home directory.
    pub fn new() -> Result<Self, CredentialsError> {
        let home = dirs::home_dir().ok_or(CredentialsError::NoHomeDirectory)?;
        Ok(Self::with_path(
            home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        ))
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// A missing file yields empty credentials.
    pub fn load(&self) -> Result<Credentials, CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(Credentials::default());
        }

        let file = File::open(&self.credentials_path).map_err(|e| self.io_error(e))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| CredentialsError::Serialization(e.to_string()))
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let file = File::create(&self.credentials_path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        writer.flush().map_err(|e| self.io_error(e))
    }

    /// Remove the credentials file if it exists.
    pub fn clear(&self) -> Result<(), CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.credentials_path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, err: std::io::Error) -> CredentialsError {
        CredentialsError::Io {
            path: self.credentials_path.clone(),
            message: err.to_string(),
        }
    }
}
