//! Shared application state.

use std::sync::Arc;

use sync2cal_providers::IntegrationRegistry;
use sync2cal_providers::weather::DailyWeatherForecast;
use tracing::info;

use crate::config::AppConfig;
use crate::error::ServerResult;

/// State handed to every request handler.
///
/// Built once at start-up; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<IntegrationRegistry>,
    /// The weather integration, also backing the shared geocoding route.
    pub weather: Arc<DailyWeatherForecast>,
}

impl AppState {
    /// Builds the registry of configured integrations.
    pub fn from_config(config: &AppConfig) -> ServerResult<Self> {
        let weather = Arc::new(DailyWeatherForecast::new(
            config.weather.to_provider_config()?,
        )?);

        let registry = IntegrationRegistry::new().with(weather.clone());
        info!(integrations = ?registry, "Integration registry ready");

        Ok(Self {
            registry: Arc::new(registry),
            weather,
        })
    }
}
