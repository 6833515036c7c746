//! Daily weather forecasts from OpenWeatherMap.
//!
//! A fetch is two sequential upstream calls: direct geocoding of the
//! location, then the 5-day / 3-hour forecast for the resulting
//! coordinates. Samples are bucketed by UTC day and each day becomes one
//! all-day [`Event`](sync2cal_core::Event).

mod aggregate;
mod client;
mod config;
mod format;
mod integration;
mod models;

pub use aggregate::{DailySummary, ForecastSample, bucket_by_day, summarize_days};
pub use client::OpenWeatherClient;
pub use config::WeatherConfig;
pub use format::{Units, compass_point, daily_event, event_uid, weather_emoji};
pub use integration::{
    DailyWeatherForecast, INTEGRATION_ID, MAX_FORECAST_DAYS, MAX_GEOCODE_RESULTS, WeatherQuery,
    request_schema,
};
pub use models::{ForecastEntry, GeoPlace};
