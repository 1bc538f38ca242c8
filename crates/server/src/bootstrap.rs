use std::sync::Arc;

use concierge_actions::{default_registry, ActionRegistry};
use concierge_core::config::{AppConfig, ConfigError, LoadOptions};
use concierge_core::ApplicationError;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub registry: Arc<ActionRegistry>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("action registry is not usable: {0}")]
    Registry(#[source] ApplicationError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let registry = default_registry();
    registry.ensure_ready().map_err(BootstrapError::Registry)?;
    info!(
        event_name = "system.bootstrap.actions_registered",
        correlation_id = "bootstrap",
        action_count = registry.len(),
        actions = %registry.names().join(","),
        "custom actions registered"
    );

    Ok(Application { config, registry: Arc::new(registry) })
}
