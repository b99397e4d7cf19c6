//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{backend_client, FakeBackend};
//!
//! let backend = FakeBackend::start().await;
//! let (client, _dir) = backend_client(&backend.uri());
//! ```

#![allow(dead_code)]

pub mod fake_backend;

pub use fake_backend::FakeBackend;

use std::sync::Arc;

use closet::adapters::mock::{InMemoryCredentials, MockHttpClient};
use closet::{ClientConfig, ClosetClient};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A client over the real reqwest transport, persisting credentials in a
/// temporary directory. Keep the directory alive for the test's duration.
pub fn backend_client(uri: &str) -> (ClosetClient, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = ClientConfig::default()
        .with_api_url(uri)
        .with_credentials_path(dir.path().join("credentials.json"));
    (ClosetClient::from_config(config).unwrap(), dir)
}

/// A client over [`MockHttpClient`], for tests that drive the clock.
pub fn mock_client(http: &MockHttpClient, creds: &InMemoryCredentials) -> ClosetClient {
    ClosetClient::with_adapters(
        ClientConfig::default().with_api_url("http://closet.test"),
        Arc::new(http.clone()),
        Arc::new(creds.clone()),
    )
}

pub fn wardrobe_item(id: &str, category: &str, part: &str) -> Value {
    json!({
        "id": id,
        "category": category,
        "style": "casual",
        "weather": "warm",
        "outfit_part": part,
        "dominant_colors": ["#222222"],
        "detected_by_ai": false
    })
}

pub fn weather_json(temperature: f64) -> Value {
    json!({
        "temperature": temperature,
        "condition": "Clear",
        "description": "clear sky",
        "city": "Lisbon",
        "humidity": 40,
        "wind_speed": 3.5
    })
}
