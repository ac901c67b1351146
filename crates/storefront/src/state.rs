//! Application state shared across handlers.

use std::sync::Arc;

use bakehouse_core::RouteTable;

use crate::backend::{BackendError, BakeryClient};
use crate::config::StorefrontConfig;
use crate::middleware::route_guard::storefront_routes;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the bakery API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    bakery: BakeryClient,
    routes: RouteTable,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the bakery API client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let bakery = BakeryClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                bakery,
                routes: storefront_routes(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the bakery API client.
    #[must_use]
    pub fn bakery(&self) -> &BakeryClient {
        &self.inner.bakery
    }

    /// Get the navigation guard's route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }
}
