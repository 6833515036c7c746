//! The `daily-weather-forecast` integration.

use sync2cal_core::Event;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::integration::{BoxFuture, Integration, IntegrationInfo};
use crate::schema::{FetchParams, ParamKind, ParamSpec, RequestSchema};

use super::aggregate::{ForecastSample, bucket_by_day, summarize_days};
use super::client::OpenWeatherClient;
use super::config::WeatherConfig;
use super::format::{Units, daily_event};
use super::models::GeoPlace;

/// Identifier the integration is registered and routed under.
pub const INTEGRATION_ID: &str = "daily-weather-forecast";

/// Longest horizon the free forecast tier covers.
pub const MAX_FORECAST_DAYS: i64 = 5;

/// Most places a geocoding lookup may return.
pub const MAX_GEOCODE_RESULTS: u8 = 5;

/// Parameters of one forecast request, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub location: String,
    pub api_key: Option<String>,
    pub days: i64,
    pub units: String,
}

impl WeatherQuery {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            api_key: None,
            days: MAX_FORECAST_DAYS,
            units: Units::Metric.as_str().to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Builds a query from parameters validated against [`request_schema`].
    pub fn from_params(params: &FetchParams) -> Self {
        let mut query = Self::new(params.get_str("location").unwrap_or_default());
        query.api_key = params.get_str("api_key").map(str::to_string);
        if let Some(days) = params.get_i64("days") {
            query.days = days;
        }
        if let Some(units) = params.get_str("units") {
            query.units = units.to_string();
        }
        query
    }

    /// Validates the query and fills in the fallback key.
    fn resolve(&self, fallback_key: Option<&str>) -> ProviderResult<ResolvedQuery> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(ProviderError::bad_request("Location is required"));
        }

        let api_key = resolve_api_key(self.api_key.as_deref(), fallback_key)?;

        Ok(ResolvedQuery {
            location: location.to_string(),
            api_key,
            days: self.days.clamp(1, MAX_FORECAST_DAYS) as usize,
            units: Units::parse_lenient(&self.units),
        })
    }
}

/// A query ready to be sent upstream.
#[derive(Debug)]
struct ResolvedQuery {
    location: String,
    api_key: String,
    days: usize,
    units: Units,
}

/// Picks the per-request key if it is non-blank, else the configured one.
fn resolve_api_key(explicit: Option<&str>, fallback: Option<&str>) -> ProviderResult<String> {
    [explicit, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::configuration(format!(
                "OpenWeatherMap API key not configured. Please set {} environment variable or provide api_key parameter.",
                WeatherConfig::API_KEY_ENV
            ))
        })
}

/// Parameters accepted by the weather integration.
pub fn request_schema() -> RequestSchema {
    RequestSchema::new(vec![
        ParamSpec::required(
            "location",
            ParamKind::String,
            "City name, e.g. \"New York, NY\" or \"London\"",
        ),
        ParamSpec::optional(
            "api_key",
            ParamKind::String,
            "OpenWeatherMap API key; falls back to the configured key",
        ),
        ParamSpec::optional(
            "days",
            ParamKind::Integer,
            "Number of days, clamped to the 5-day forecast horizon",
        )
        .with_default("5"),
        ParamSpec::optional(
            "units",
            ParamKind::String,
            "metric (Celsius), imperial (Fahrenheit) or kelvin",
        )
        .with_default("metric"),
    ])
}

/// Daily forecasts for a city, one all-day event per day.
#[derive(Debug)]
pub struct DailyWeatherForecast {
    client: OpenWeatherClient,
    info: IntegrationInfo,
}

impl DailyWeatherForecast {
    /// Creates the integration. The config's API key is the fallback for
    /// requests that do not carry one.
    pub fn new(config: WeatherConfig) -> ProviderResult<Self> {
        let info = IntegrationInfo::new(INTEGRATION_ID, "Daily Weather Forecast")
            .with_description("Daily weather forecasts")
            .with_base_url(WeatherConfig::DEFAULT_BASE_URL)
            .with_params(request_schema());

        Ok(Self {
            client: OpenWeatherClient::new(config)?,
            info,
        })
    }

    /// Geocodes the location, fetches its forecast and emits one event per day.
    ///
    /// # Errors
    ///
    /// Any failure aborts the fetch. Errors carry the status the HTTP layer
    /// should answer with.
    pub async fn forecast_events(&self, query: &WeatherQuery) -> ProviderResult<Vec<Event>> {
        self.forecast_events_inner(query)
            .await
            .map_err(|e| e.with_provider(INTEGRATION_ID))
    }

    async fn forecast_events_inner(&self, query: &WeatherQuery) -> ProviderResult<Vec<Event>> {
        let request = query.resolve(self.client.config().api_key.as_deref())?;
        debug!(
            location = %request.location,
            days = request.days,
            units = %request.units,
            "Fetching weather forecast"
        );

        let place = self
            .client
            .geocode(&request.location, 1, &request.api_key)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::not_found(format!("Location not found: {}", request.location))
            })?;
        let city = place.name.clone().unwrap_or_else(|| request.location.clone());

        let entries = self
            .client
            .forecast(place.lat, place.lon, request.units, &request.api_key)
            .await?;

        let buckets = bucket_by_day(entries.iter().filter_map(ForecastSample::from_entry));
        let events: Vec<Event> = summarize_days(&buckets, request.days)
            .iter()
            .map(|summary| daily_event(summary, request.units, &city))
            .collect();

        info!(
            city = %city,
            samples = entries.len(),
            days = events.len(),
            "Built weather forecast events"
        );
        Ok(events)
    }

    /// Looks up places matching `query`, for location pickers.
    ///
    /// `limit` is clamped to [1, 5].
    pub async fn geocode_places(
        &self,
        query: &str,
        limit: i64,
        api_key: Option<&str>,
    ) -> ProviderResult<Vec<GeoPlace>> {
        let lookup = async {
            let query = query.trim();
            if query.is_empty() {
                return Err(ProviderError::bad_request("Query is required"));
            }
            let api_key = resolve_api_key(api_key, self.client.config().api_key.as_deref())?;
            let limit = limit.clamp(1, MAX_GEOCODE_RESULTS as i64) as u8;
            self.client.geocode(query, limit, &api_key).await
        };
        lookup.await.map_err(|e| e.with_provider(INTEGRATION_ID))
    }
}

impl Integration for DailyWeatherForecast {
    fn info(&self) -> &IntegrationInfo {
        &self.info
    }

    fn fetch_events(&self, params: FetchParams) -> BoxFuture<'_, ProviderResult<Vec<Event>>> {
        Box::pin(async move {
            let query = WeatherQuery::from_params(&params);
            self.forecast_events(&query).await
        })
    }

    /// `"Daily Weather Forecast - {city}"` once the city is known.
    fn calendar_name(&self, events: &[Event]) -> String {
        match events.first().and_then(|e| e.location.as_deref()) {
            Some(location) if !location.is_empty() => format!("{} - {}", self.info.name, location),
            _ => self.info.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use std::collections::HashMap;

    fn integration() -> DailyWeatherForecast {
        DailyWeatherForecast::new(WeatherConfig::new("http://127.0.0.1:9").unwrap()).unwrap()
    }

    #[test]
    fn resolve_normalizes_inputs() {
        let query = WeatherQuery::new("  London ")
            .with_days(10)
            .with_units("Fahrenheit");
        let resolved = query.resolve(Some("key")).unwrap();

        assert_eq!(resolved.location, "London");
        assert_eq!(resolved.days, 5);
        assert_eq!(resolved.units, Units::Metric);
        assert_eq!(resolved.api_key, "key");

        let resolved = WeatherQuery::new("Oslo")
            .with_days(-3)
            .with_units("IMPERIAL")
            .resolve(Some("key"))
            .unwrap();
        assert_eq!(resolved.days, 1);
        assert_eq!(resolved.units, Units::Imperial);
    }

    #[test]
    fn blank_location_is_bad_request() {
        let err = WeatherQuery::new("   ").resolve(Some("key")).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert_eq!(err.message(), "Location is required");
    }

    #[test]
    fn explicit_key_wins_and_blank_falls_back() {
        let resolved = WeatherQuery::new("Paris")
            .with_api_key(" mine ")
            .resolve(Some("server"))
            .unwrap();
        assert_eq!(resolved.api_key, "mine");

        let resolved = WeatherQuery::new("Paris")
            .with_api_key("  ")
            .resolve(Some("server"))
            .unwrap();
        assert_eq!(resolved.api_key, "server");
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = WeatherQuery::new("Paris").resolve(None).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.status(), 500);
        assert!(err.message().contains("OPENWEATHERMAP_API_KEY"));
    }

    #[test]
    fn query_from_validated_params() {
        let raw: HashMap<String, String> = [("location", "Berlin"), ("units", "kelvin")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let params = request_schema().validate(&raw).unwrap();
        let query = WeatherQuery::from_params(&params);

        assert_eq!(query.location, "Berlin");
        assert_eq!(query.days, 5);
        assert_eq!(query.units, "kelvin");
        assert!(query.api_key.is_none());
    }

    #[test]
    fn integration_info() {
        let weather = integration();
        let info = weather.info();

        assert_eq!(info.id, "daily-weather-forecast");
        assert_eq!(info.route_slug(), "daily-weather-forecast");
        assert_eq!(info.name, "Daily Weather Forecast");
        assert_eq!(info.base_url, "https://api.openweathermap.org");
        assert!(!info.multi_calendar);
        assert_eq!(info.params.params().len(), 4);
    }

    #[test]
    fn calendar_name_includes_city() {
        let weather = integration();
        assert_eq!(weather.calendar_name(&[]), "Daily Weather Forecast");

        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let events = vec![Event::all_day_on("weather-london-20240621", "t", date).with_location("London")];
        assert_eq!(
            weather.calendar_name(&events),
            "Daily Weather Forecast - London"
        );
    }

    #[tokio::test]
    async fn validation_errors_carry_provider() {
        let err = integration()
            .forecast_events(&WeatherQuery::new("").with_api_key("k"))
            .await
            .unwrap_err();
        assert_eq!(err.provider(), Some("daily-weather-forecast"));
        assert_eq!(err.status(), 400);

        let err = integration()
            .geocode_places(" ", 3, Some("k"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), 400);
    }
}
