//! HTTP API serving integration events as JSON or ICS.
//!
//! This crate provides the `sync2cal` server:
//! - one `/{integration}/events` feed per registered integration
//! - a registry listing at `/integrations`
//! - the weather geocoding lookup at `/weather/geocode`
//!
//! # Example
//!
//! ```rust,no_run
//! use sync2cal_server::{AppConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?.with_env_overrides();
//!     serve(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod secret;
pub mod signals;
pub mod state;

use axum::Router;
use tracing::info;

pub use config::AppConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use state::AppState;

/// Builds the application router for a configuration.
pub fn build_app(config: &AppConfig) -> ServerResult<Router> {
    let state = AppState::from_config(config)?;
    let cors = cors::cors_layer(&config.cors.origins)?;
    Ok(routes::app(state, cors))
}

/// Binds the configured address and serves until a shutdown signal arrives.
pub async fn serve(config: &AppConfig) -> ServerResult<()> {
    let app = build_app(config)?;
    let addr = config.listen_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::bind(&addr, e))?;
    info!(addr = %addr, origins = ?config.cors.origins, "sync2cal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
