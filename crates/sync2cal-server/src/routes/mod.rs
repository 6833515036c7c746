//! HTTP routes.

pub mod events;
pub mod geocode;
pub mod integrations;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembles every route with tracing and the CORS policy applied.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(integrations::router())
        .merge(geocode::router())
        .merge(events::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
