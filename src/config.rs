//! Client configuration.

use std::path::PathBuf;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration for [`ClosetClient`](crate::ClosetClient).
///
/// # Example
///
/// ```
/// use closet::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_url("https://closet.example.com")
///     .with_dev_mode(false);
/// assert_eq!(config.api_url, "https://closet.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL (default: http://localhost:8000)
    pub api_url: String,
    /// Synthesize sessions locally instead of calling login/signup
    pub dev_mode: bool,
    /// Override for the credentials file (default: ~/.closet/credentials.json)
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            dev_mode: false,
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Read `CLOSET_API_URL`, `CLOSET_DEV_MODE` and `CLOSET_CREDENTIALS_PATH`.
    ///
    /// Empty values are ignored. Dev mode is on for any value other than
    /// `0`, `false` or `no`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var("CLOSET_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(flag) = non_empty_var("CLOSET_DEV_MODE") {
            config = config.with_dev_mode(is_truthy(&flag));
        }
        if let Some(path) = non_empty_var("CLOSET_CREDENTIALS_PATH") {
            config = config.with_credentials_path(path);
        }

        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no"
    )
}
