mod bootstrap;
mod health;
mod webhook;

use anyhow::Result;
use concierge_core::config::{AppConfig, LoadOptions};
use tokio::net::TcpListener;

fn init_logging(config: &AppConfig) {
    use concierge_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Logging comes up before bootstrap so registry failures are reported.
    let mut config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let auth_token = config.server.auth_token.take();
    let app = bootstrap::bootstrap_with_config(config)?;
    let listen_address = app.config.listen_address();

    let router = webhook::router(webhook::WebhookState::new(app.registry.clone(), auth_token))
        .merge(health::router(app.registry.clone()));

    let listener = TcpListener::bind(&listen_address).await?;
    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        listen_address = %listen_address,
        action_count = app.registry.len(),
        "concierge action server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "concierge action server stopping"
    );

    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(
            event_name = "system.server.signal_error",
            correlation_id = "shutdown",
            error = %error,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}
