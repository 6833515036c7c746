//! Location lookup shared by the weather calendars.

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use sync2cal_providers::weather::{GeoPlace, MAX_GEOCODE_RESULTS};
use sync2cal_providers::{ParamKind, ParamSpec, RequestSchema};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/weather/geocode", get(geocode))
}

fn geocode_schema() -> RequestSchema {
    RequestSchema::new(vec![
        ParamSpec::required("q", ParamKind::String, "Free-text location"),
        ParamSpec::optional("limit", ParamKind::Integer, "Maximum matches, 1 to 5").with_default("5"),
        ParamSpec::optional("api_key", ParamKind::String, "OpenWeatherMap API key"),
    ])
}

/// GET /weather/geocode - Resolve a location string to candidate places
async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<GeoPlace>>, ApiError> {
    let params = geocode_schema().validate(&query)?;
    let places = state
        .weather
        .geocode_places(
            params.get_str("q").unwrap_or_default(),
            params
                .get_i64("limit")
                .unwrap_or(i64::from(MAX_GEOCODE_RESULTS)),
            params.get_str("api_key"),
        )
        .await?;
    Ok(Json(places))
}
