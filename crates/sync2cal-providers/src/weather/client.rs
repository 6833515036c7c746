//! HTTP client for the OpenWeatherMap API.
//!
//! OpenWeatherMap reports failures in three shapes, all handled here:
//! - plain HTTP 401/429 statuses
//! - a JSON body carrying `cod` = "401"/"429" even under HTTP 200
//! - a JSON body with a `message` and any other `cod` than "200"

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::WeatherConfig;
use super::format::Units;
use super::models::{ForecastEntry, GeoPlace};

const GEOCODE_PATH: &str = "geo/1.0/direct";
const FORECAST_PATH: &str = "data/2.5/forecast";

/// HTTP client for geocoding and forecast lookups.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: WeatherConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Resolves a free-text location to at most `limit` places.
    pub async fn geocode(
        &self,
        query: &str,
        limit: u8,
        api_key: &str,
    ) -> ProviderResult<Vec<GeoPlace>> {
        let body = self
            .get_json(
                GEOCODE_PATH,
                &[
                    ("q", query.to_string()),
                    ("limit", limit.to_string()),
                    ("appid", api_key.to_string()),
                ],
            )
            .await?;

        match body {
            Value::Null => Ok(Vec::new()),
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<GeoPlace>, _>>()
                .map_err(parse_error),
            other => Err(ProviderError::internal(format!(
                "Failed to fetch weather events: unexpected geocoding response: {}",
                other
            ))),
        }
    }

    /// Fetches the 3-hour forecast for a coordinate pair.
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        api_key: &str,
    ) -> ProviderResult<Vec<ForecastEntry>> {
        let body = self
            .get_json(
                FORECAST_PATH,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("units", units.as_str().to_string()),
                    ("appid", api_key.to_string()),
                ],
            )
            .await?;

        let list = match body {
            Value::Object(mut map) => map.remove("list"),
            _ => None,
        }
        .ok_or_else(|| ProviderError::invalid_response("Invalid forecast response format"))?;

        serde_json::from_value(list).map_err(parse_error)
    }

    /// Sends a GET request and returns the JSON body once all error shapes
    /// have been ruled out.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<Value> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "Requesting weather API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "Received response");

        if status == StatusCode::UNAUTHORIZED {
            warn!("Weather API rejected the API key");
            return Err(ProviderError::authentication("Invalid API key"));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Weather API rate limit exceeded");
            return Err(ProviderError::rate_limited("API rate limit exceeded"));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let is_error_status = status.is_client_error() || status.is_server_error();

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if is_error_status => return Err(status_error(status)),
            Err(_) => {
                return Err(ProviderError::invalid_response(
                    "Invalid response from weather API",
                ));
            }
        };

        if let Value::Object(map) = &body {
            check_error_body(map)?;
        }

        if is_error_status {
            return Err(status_error(status));
        }

        Ok(body)
    }
}

/// Rejects bodies that carry an embedded error.
fn check_error_body(body: &Map<String, Value>) -> ProviderResult<()> {
    let cod = body.get("cod").map(cod_string);
    let message = body.get("message").and_then(message_string);

    match cod.as_deref() {
        Some("401") => {
            warn!("Weather API rejected the API key");
            return Err(ProviderError::authentication(
                message.unwrap_or_else(|| "Invalid API key".to_string()),
            ));
        }
        Some("429") => {
            warn!("Weather API rate limit exceeded");
            return Err(ProviderError::rate_limited(
                message.unwrap_or_else(|| "API rate limit exceeded".to_string()),
            ));
        }
        _ => {}
    }

    if body.contains_key("message") && cod.as_deref() != Some("200") {
        let status = cod
            .as_deref()
            .and_then(|c| c.trim().parse::<u16>().ok())
            .filter(|s| (400..=599).contains(s))
            .unwrap_or(500);
        let message = message.unwrap_or_else(|| "Unknown error".to_string());
        warn!(status, message = %message, "Weather API reported an error");
        return Err(ProviderError::upstream_status(
            status,
            format!("Weather API error: {}", message),
        ));
    }

    Ok(())
}

/// `cod` arrives as a string from some endpoints and a number from others.
fn cod_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn message_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn status_error(status: StatusCode) -> ProviderError {
    ProviderError::network(format!("Weather API request failed: HTTP {}", status))
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    // The request URL carries the API key.
    let e = e.without_url();
    let message = if e.is_timeout() {
        "Weather API request failed: request timed out".to_string()
    } else {
        format!("Weather API request failed: {}", e)
    };
    ProviderError::network(message).with_source(e)
}

fn parse_error(e: serde_json::Error) -> ProviderError {
    ProviderError::internal(format!("Failed to fetch weather events: {}", e)).with_source(e)
}
