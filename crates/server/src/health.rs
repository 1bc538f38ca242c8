use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use concierge_actions::ActionRegistry;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    registry: Arc<ActionRegistry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub actions: HealthCheck,
    pub checked_at: String,
}

pub fn router(registry: Arc<ActionRegistry>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { registry })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let actions = actions_check(&state.registry);
    let ready = actions.status == "ok";

    let payload = HealthResponse {
        status: if ready { "ok" } else { "degraded" },
        service: HealthCheck {
            status: "ok",
            detail: "concierge action server running".to_string(),
        },
        actions,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn actions_check(registry: &ActionRegistry) -> HealthCheck {
    match registry.ensure_ready() {
        Ok(()) => HealthCheck {
            status: "ok",
            detail: format!("{} actions registered", registry.len()),
        },
        Err(error) => HealthCheck { status: "degraded", detail: error.to_string() },
    }
}
