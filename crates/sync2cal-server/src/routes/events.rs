//! Per-integration event feeds.

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use sync2cal_core::generate_ics;
use sync2cal_providers::{ParamKind, ParamSpec, RequestSchema};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter choosing ICS (default) or JSON output.
pub const ICS_PARAM: &str = "ics";

/// Output options shared by every integration's feed.
fn output_schema() -> RequestSchema {
    RequestSchema::new(vec![
        ParamSpec::optional(ICS_PARAM, ParamKind::Boolean, "Return ICS text instead of JSON")
            .with_default("true"),
    ])
}

pub fn router() -> Router<AppState> {
    Router::new().route("/{integration}/events", get(fetch_events))
}

/// GET /{integration}/events - Fetch events as ICS text or a JSON array
async fn fetch_events(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(mut query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let integration = state
        .registry
        .get(&slug)
        .ok_or_else(|| ApiError::not_found(format!("Integration not found: {}", slug)))?;

    let output = output_schema().validate(&query)?;
    let ics = output.get_bool(ICS_PARAM).unwrap_or(true);
    query.remove(ICS_PARAM);

    let params = integration.info().params.validate(&query)?;
    let events = integration.fetch_events(params).await?;
    info!(integration = %integration.info().id, events = events.len(), ics, "Served events");

    if ics {
        let calendar_name = integration.calendar_name(&events);
        let body = generate_ics(&events, &calendar_name);
        Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
    } else {
        Ok(Json(events).into_response())
    }
}
