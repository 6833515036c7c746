//! The `Integration` trait.
//!
//! An integration adapts one upstream source (a weather API, a TV listing
//! site, ...) into a sequence of [`Event`]s. Integrations are:
//! - described by an [`IntegrationInfo`], including the [`RequestSchema`] of
//!   parameters they accept
//! - stateless between fetches: every call performs its own upstream requests

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use sync2cal_core::Event;

use crate::error::ProviderResult;
use crate::schema::{FetchParams, RequestSchema};

/// Static description of an integration.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationInfo {
    /// Unique identifier (e.g. `daily-weather-forecast`).
    pub id: String,
    /// Human-readable name, also used as the default calendar name.
    pub name: String,
    pub description: String,
    /// Root URL of the upstream service.
    pub base_url: String,
    /// Whether the integration exposes several calendars per account.
    pub multi_calendar: bool,
    /// Parameters accepted by `fetch_events`.
    pub params: RequestSchema,
}

impl IntegrationInfo {
    /// Creates a new info block with an empty schema.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            base_url: String::new(),
            multi_calendar: false,
            params: RequestSchema::default(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the upstream base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder method to set the request schema.
    pub fn with_params(mut self, params: RequestSchema) -> Self {
        self.params = params;
        self
    }

    /// The URL path segment the integration is mounted under.
    pub fn route_slug(&self) -> String {
        self.id.replace('_', "-")
    }
}

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so integrations can live behind
/// `Arc<dyn Integration>` in the registry.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A provider-specific adapter exposing a uniform fetch operation.
pub trait Integration: Send + Sync {
    /// Returns the static description of this integration.
    fn info(&self) -> &IntegrationInfo;

    /// Fetches and normalizes events.
    ///
    /// `params` has already been validated against `info().params`.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole fetch; no partial event list is returned.
    fn fetch_events(&self, params: FetchParams) -> BoxFuture<'_, ProviderResult<Vec<Event>>>;

    /// The name given to the calendar when the events are rendered as ICS.
    fn calendar_name(&self, events: &[Event]) -> String {
        let _ = events;
        self.info().name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamKind, ParamSpec};

    struct Fixed {
        info: IntegrationInfo,
    }

    impl Integration for Fixed {
        fn info(&self) -> &IntegrationInfo {
            &self.info
        }

        fn fetch_events(&self, _params: FetchParams) -> BoxFuture<'_, ProviderResult<Vec<Event>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[test]
    fn info_builder() {
        let info = IntegrationInfo::new("google_sheets", "Google Sheets")
            .with_description("Google Sheets integration")
            .with_base_url("https://sheets.googleapis.com")
            .with_params(RequestSchema::new(vec![ParamSpec::required(
                "sheet_id",
                ParamKind::String,
                "Spreadsheet id",
            )]));

        assert_eq!(info.route_slug(), "google-sheets");
        assert!(!info.multi_calendar);
        assert_eq!(info.params.params().len(), 1);
    }

    #[tokio::test]
    async fn default_calendar_name_is_integration_name() {
        let integration = Fixed {
            info: IntegrationInfo::new("wwe", "WWE"),
        };

        let events = integration.fetch_events(FetchParams::new()).await.unwrap();
        assert!(events.is_empty());
        assert_eq!(integration.calendar_name(&events), "WWE");
    }
}
