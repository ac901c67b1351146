//! Application state shared across handlers.

use std::sync::Arc;

use bakehouse_core::RouteTable;

use crate::backend::{AdminClient, BackendError};
use crate::config::AdminConfig;
use crate::middleware::access::admin_routes;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    bakery: AdminClient,
    routes: RouteTable,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the bakery API client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, BackendError> {
        let bakery = AdminClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                bakery,
                routes: admin_routes(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn bakery(&self) -> &AdminClient {
        &self.inner.bakery
    }

    /// Route table used by the access guard.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }
}
