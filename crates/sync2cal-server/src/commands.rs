//! One-shot CLI commands.

use std::collections::HashMap;
use std::fmt::Write;

use sync2cal_core::generate_ics;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Runs one integration and renders its events as ICS, or JSON when `json`.
pub async fn fetch(
    config: &AppConfig,
    integration: &str,
    params: Vec<(String, String)>,
    json: bool,
) -> ServerResult<String> {
    let state = AppState::from_config(config)?;
    let integration = state
        .registry
        .get(integration)
        .ok_or_else(|| ServerError::UnknownIntegration(integration.to_string()))?;

    let raw: HashMap<String, String> = params.into_iter().collect();
    let params = integration.info().params.validate(&raw)?;
    debug!(integration = %integration.info().id, "Fetching events");
    let events = integration.fetch_events(params).await?;

    if json {
        Ok(serde_json::to_string_pretty(&events)?)
    } else {
        Ok(generate_ics(&events, &integration.calendar_name(&events)))
    }
}

/// Lists registered integrations with their parameters.
pub fn integrations(config: &AppConfig) -> ServerResult<String> {
    let state = AppState::from_config(config)?;
    let mut out = String::new();

    for info in state.registry.infos() {
        let _ = writeln!(out, "{}  {} - {}", info.route_slug(), info.name, info.description);
        for param in info.params.params() {
            let requirement = match (param.required, param.default) {
                (true, _) => "required".to_string(),
                (false, Some(default)) => format!("default {}", default),
                (false, None) => "optional".to_string(),
            };
            let _ = writeln!(
                out,
                "    {:<10} {:<8} {:<16} {}",
                param.name,
                param.kind.as_str(),
                requirement,
                param.description
            );
        }
    }

    Ok(out)
}
