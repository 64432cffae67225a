pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use services::resource_client::ResourceClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ResourceClient,
    pub config: config::AppConfig,
}

impl AppState {
    /// Build state from configuration, creating the upstream client.
    pub fn new(config: config::AppConfig) -> Result<Self, errors::ClientError> {
        let client = ResourceClient::new(&config.upstream_api_url, config.upstream_timeout())?;
        Ok(Self { client, config })
    }
}
