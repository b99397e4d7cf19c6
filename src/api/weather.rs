//! Current-weather endpoint.

use super::client::ApiClient;
use crate::error::ClosetResult;
use crate::models::WeatherSnapshot;

#[derive(Debug, Clone)]
pub struct WeatherApi {
    client: ApiClient,
}

impl WeatherApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/weather`
    pub async fn current(&self) -> ClosetResult<WeatherSnapshot> {
        self.client.get_json("/api/weather").await
    }
}
