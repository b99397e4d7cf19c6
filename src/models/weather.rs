//! Current-weather snapshot.

use serde::{Deserialize, Serialize};

/// Weather as reported by `GET /api/weather`.
///
/// Accepts `temperature`/`temp`, `condition`/`weather`,
/// `wind_speed`/`windSpeed` and `city`/`location`. A missing temperature reads
/// as `0.0` and a missing condition as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeather")]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: f64,
    pub condition: String,
    pub description: Option<String>,
    pub city: Option<String>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Meters per second
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWeather {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    weather: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    wind_speed: Option<f64>,
    #[serde(default, rename = "windSpeed")]
    wind_speed_camel: Option<f64>,
}

impl From<RawWeather> for WeatherSnapshot {
    fn from(raw: RawWeather) -> Self {
        Self {
            temperature: raw.temperature.or(raw.temp).unwrap_or(0.0),
            condition: raw
                .condition
                .or(raw.weather)
                .unwrap_or_else(|| "Unknown".to_string()),
            description: raw.description,
            city: raw.city.or(raw.location),
            humidity: raw.humidity,
            wind_speed: raw.wind_speed.or(raw.wind_speed_camel),
        }
    }
}

impl WeatherSnapshot {
    /// Coarse bucket used to match the `weather` field of wardrobe items.
    pub fn suitability(&self) -> &'static str {
        if self.temperature < 15.0 {
            "cold"
        } else {
            "warm"
        }
    }
}
