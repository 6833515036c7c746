//! Integrations that turn third-party APIs into calendar events.
//!
//! - [`Integration`] - The trait every upstream adapter implements
//! - [`RequestSchema`] - Declares the query parameters an integration accepts
//! - [`IntegrationRegistry`] - The integrations a process serves
//! - [`ProviderError`] - Error types carrying the HTTP status to answer with
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sync2cal_providers::{IntegrationRegistry, weather::{DailyWeatherForecast, WeatherConfig}};
//!
//! let config = WeatherConfig::new(WeatherConfig::DEFAULT_BASE_URL)?.with_api_key_from_env();
//! let registry = IntegrationRegistry::new().with(Arc::new(DailyWeatherForecast::new(config)?));
//!
//! let weather = registry.get("daily-weather-forecast").unwrap();
//! let params = weather.info().params.validate(&query)?;
//! let events = weather.fetch_events(params).await?;
//! ```

pub mod error;
pub mod integration;
pub mod registry;
pub mod schema;
pub mod weather;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use integration::{BoxFuture, Integration, IntegrationInfo};
pub use registry::IntegrationRegistry;
pub use schema::{FetchParams, ParamKind, ParamSpec, ParamValue, RequestSchema};
