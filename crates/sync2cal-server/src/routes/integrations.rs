//! Registry listing.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use sync2cal_providers::IntegrationInfo;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/integrations", get(list_integrations))
}

/// GET /integrations - Describe every registered integration and its parameters
async fn list_integrations(State(state): State<AppState>) -> Json<Vec<IntegrationInfo>> {
    Json(state.registry.infos().into_iter().cloned().collect())
}
