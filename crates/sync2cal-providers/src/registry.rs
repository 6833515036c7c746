//! The set of integrations served by one process.

use std::sync::Arc;

use crate::integration::{Integration, IntegrationInfo};

/// Integrations configured at start-up, looked up by route slug.
///
/// Built once and shared read-only with the routing layer.
#[derive(Clone, Default)]
pub struct IntegrationRegistry {
    integrations: Vec<Arc<dyn Integration>>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an integration.
    ///
    /// A later registration with the same route slug replaces the earlier one.
    pub fn with(mut self, integration: Arc<dyn Integration>) -> Self {
        let slug = integration.info().route_slug();
        self.integrations
            .retain(|existing| existing.info().route_slug() != slug);
        self.integrations.push(integration);
        self
    }

    /// Finds an integration by its route slug (`_` in ids is written as `-`).
    pub fn get(&self, slug: &str) -> Option<Arc<dyn Integration>> {
        let slug = slug.replace('_', "-");
        self.integrations
            .iter()
            .find(|i| i.info().route_slug() == slug)
            .cloned()
    }

    /// Descriptions of all registered integrations, in registration order.
    pub fn infos(&self) -> Vec<&IntegrationInfo> {
        self.integrations.iter().map(|i| i.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }
}

impl std::fmt::Debug for IntegrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.integrations.iter().map(|i| &i.info().id))
            .finish()
    }
}
