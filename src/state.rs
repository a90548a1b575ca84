use std::sync::Arc;

use crate::agents_service::AgentsServiceClient;
use crate::config::Config;
use crate::error::UpstreamError;

/// Shared per-request state. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agents_service: Arc<AgentsServiceClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let agents_service =
            AgentsServiceClient::new(config.agents_url.clone(), config.upstream_timeout())?;
        Ok(Self::with_agents_service(config, agents_service))
    }

    pub fn with_agents_service(config: Config, agents_service: AgentsServiceClient) -> Self {
        Self {
            config: Arc::new(config),
            agents_service: Arc::new(agents_service),
        }
    }
}
