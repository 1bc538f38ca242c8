//! Action server HTTP surface: `POST /webhook` and `GET /actions`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use concierge_actions::{ActionCall, ActionInfo, ActionRegistry, ActionResponse};
use concierge_core::{ApplicationError, InterfaceError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct WebhookState {
    registry: Arc<ActionRegistry>,
    auth_token: Option<Arc<SecretString>>,
}

impl WebhookState {
    pub fn new(registry: Arc<ActionRegistry>, auth_token: Option<SecretString>) -> Self {
        Self { registry, auth_token: auth_token.map(Arc::new) }
    }
}

/// Error body in the shape the dialogue host expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

type WebhookResult<T> = Result<Json<T>, (StatusCode, Json<WebhookError>)>;

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/actions", get(list_actions))
        .with_state(state)
}

pub async fn webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> WebhookResult<ActionResponse> {
    let correlation_id = Uuid::new_v4().to_string();

    authorize(state.auth_token.as_deref(), &headers, &correlation_id)
        .map_err(|error| reject(error, None))?;

    let call = payload
        .map_err(|rejection| ApplicationError::InvalidRequest(rejection.body_text()))
        .and_then(|Json(raw)| ActionCall::from_json(raw))
        .map_err(|error| {
            warn!(
                event_name = "server.webhook.invalid_request",
                correlation_id = %correlation_id,
                error = %error,
                "rejected malformed action call"
            );
            reject(error.into_interface(correlation_id.clone()), None)
        })?;

    info!(
        event_name = "server.webhook.received",
        correlation_id = %correlation_id,
        action_name = %call.next_action,
        sender_id = %call.conversation_id(),
        "action call received"
    );

    match state.registry.execute(&call).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => {
            let action_name = error.action_name().map(str::to_owned);
            Err(reject(error.into_interface(correlation_id), action_name))
        }
    }
}

pub async fn list_actions(State(state): State<WebhookState>) -> Json<Vec<ActionInfo>> {
    Json(state.registry.describe())
}

/// Accepts `Authorization: Bearer <token>` or the bare token.
fn authorize(
    expected: Option<&SecretString>,
    headers: &HeaderMap,
    correlation_id: &str,
) -> Result<(), InterfaceError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim())
        .map(|value| value.strip_prefix("Bearer ").map(str::trim).unwrap_or(value));

    if presented == Some(expected.expose_secret()) {
        return Ok(());
    }

    warn!(
        event_name = "server.webhook.unauthorized",
        correlation_id = %correlation_id,
        header_present = presented.is_some(),
        "action call rejected by token check"
    );
    Err(InterfaceError::Unauthorized {
        message: "missing or invalid authorization token".to_string(),
        correlation_id: correlation_id.to_string(),
    })
}

fn reject(error: InterfaceError, action_name: Option<String>) -> (StatusCode, Json<WebhookError>) {
    let status = match &error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &error {
        InterfaceError::Internal { .. } => error.user_message().to_string(),
        _ => error.message().to_string(),
    };

    (status, Json(WebhookError { error: message, action_name }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::State,
        http::{header::AUTHORIZATION, HeaderMap, HeaderValue, Request, StatusCode},
        Json,
    };
    use concierge_actions::{default_registry, ActionResponse};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{list_actions, router, webhook, WebhookError, WebhookState};

    fn state(token: Option<&str>) -> WebhookState {
        WebhookState::new(Arc::new(default_registry()), token.map(SecretString::from))
    }

    fn time_query() -> Value {
        json!({
            "next_action": "direct_time_query",
            "sender_id": "student-3",
            "tracker": {
                "sender_id": "student-3",
                "slots": {},
                "latest_message": {
                    "text": "when does amul open",
                    "intent": {"name": "ask_time"},
                    "entities": [{"entity": "Location", "value": "amul"}]
                },
                "events": []
            },
            "domain": {},
            "version": "3.6.0"
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn webhook_runs_the_named_action() {
        let Json(response): Json<ActionResponse> =
            webhook(State(state(None)), HeaderMap::new(), Ok(Json(time_query())))
                .await
                .expect("known action succeeds");

        assert!(response.events.is_empty());
        assert_eq!(response.responses.len(), 1);
        assert_eq!(response.responses[0].template.as_deref(), Some("utter_open_close_time_amul"));
    }

    #[tokio::test]
    async fn unknown_action_returns_host_shaped_not_found() {
        let mut payload = time_query();
        payload["next_action"] = json!("action_book_table");

        let (status, Json(body)) =
            webhook(State(state(None)), HeaderMap::new(), Ok(Json(payload)))
                .await
                .expect_err("unknown action fails");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            WebhookError {
                error: "No registered action found for name 'action_book_table'.".to_string(),
                action_name: Some("action_book_table".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn payload_without_next_action_is_bad_request() {
        let (status, Json(body)) =
            webhook(State(state(None)), HeaderMap::new(), Ok(Json(json!({"tracker": {}}))))
                .await
                .expect_err("payload is invalid");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("next_action"));
        assert_eq!(body.action_name, None);
    }

    #[tokio::test]
    async fn configured_token_is_enforced() {
        let (status, _) =
            webhook(State(state(Some("s3cret"))), HeaderMap::new(), Ok(Json(time_query())))
                .await
                .expect_err("missing token is rejected");
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert!(webhook(State(state(Some("s3cret"))), headers, Ok(Json(time_query())))
            .await
            .is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("s3cret"));
        assert!(webhook(State(state(Some("s3cret"))), headers, Ok(Json(time_query())))
            .await
            .is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer wrong"));
        let (status, _) = webhook(State(state(Some("s3cret"))), headers, Ok(Json(time_query())))
            .await
            .expect_err("wrong token is rejected");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn actions_listing_is_sorted() {
        let Json(listing) = list_actions(State(state(None))).await;
        let names = listing.iter().map(|info| info.name.as_str()).collect::<Vec<_>>();

        assert_eq!(names.len(), 9);
        assert_eq!(names.first(), Some(&"department_query"));
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn router_serves_form_validation_over_http() {
        let payload = json!({
            "next_action": "validate_restaurant_form",
            "tracker": {
                "sender_id": "student-9",
                "slots": {"cuisine": "Italian"},
                "latest_message": {"text": "italian for 12"},
                "events": [
                    {"event": "user", "text": "italian for 12"},
                    {"event": "slot", "name": "cuisine", "value": "Italian"},
                    {"event": "slot", "name": "number_for_restaurant", "value": "12"}
                ]
            }
        });

        let response = router(state(None))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["events"],
            json!([
                {"event": "slot", "timestamp": null, "name": "cuisine", "value": "italian"},
                {"event": "slot", "timestamp": null, "name": "number_for_restaurant", "value": null}
            ])
        );
        assert_eq!(body["responses"][0]["template"], json!("utter_more_num_of_people"));
    }

    #[tokio::test]
    async fn router_maps_malformed_json_to_bad_request() {
        let response = router(state(None))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
