//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::client::HospitalApiClient;
use crate::config::ConsoleConfig;
use crate::service::ConsoleService;

/// Console service over the live hospital API client.
pub type LiveConsole = ConsoleService<HospitalApiClient>;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Console service for all screen logic.
    pub console: Arc<LiveConsole>,
}

impl AppState {
    /// Builds the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, crate::error::ConsoleError> {
        let client = HospitalApiClient::new(config)?;
        Ok(Self {
            console: Arc::new(ConsoleService::new(client)),
        })
    }
}
