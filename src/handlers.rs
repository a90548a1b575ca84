use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use tracing::{debug, error, info, warn};

use crate::agents_service::UpstreamReply;
use crate::error::UpstreamError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "agents-ui-proxy";

/// The calls the proxy forwards to the agents service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    Chat,
    AgentsList,
}

impl Forward {
    /// Error text shown to the browser; upstream detail only goes to the log.
    pub fn public_error(self) -> &'static str {
        match self {
            Forward::Chat => "Failed to communicate with agents service",
            Forward::AgentsList => "Failed to get agents list",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Forward::Chat => "chat",
            Forward::AgentsList => "agents",
        }
    }
}

/// Await a forwarded call and turn it into the response for the browser.
///
/// A 2xx reply is relayed with its status and body bytes untouched. Any
/// failure (connect error, timeout, non-2xx, unparseable body) is logged
/// and replaced by `{"error": ...}` with a 500.
pub async fn relay<F>(forward: Forward, call: F) -> Response
where
    F: Future<Output = Result<UpstreamReply, UpstreamError>>,
{
    match call.await {
        Ok(reply) => {
            debug!("Relaying {} reply with status {}", forward.label(), reply.status);
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            if reply.body.is_empty() {
                return status.into_response();
            }
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response()
        }
        Err(e) => {
            error!("Error forwarding {} request: {}", forward.label(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": forward.public_error() })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
struct ChatTarget {
    agent_name: Option<String>,
}

/// POST /api/chat
///
/// The body is only checked for being JSON; the bytes go upstream as sent.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    if let Err(e) = serde_json::from_slice::<IgnoredAny>(&body) {
        warn!("Rejecting chat request with invalid JSON: {}", e);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Request body must be valid JSON" })),
        )
            .into_response();
    }

    let agent = serde_json::from_slice::<ChatTarget>(&body)
        .ok()
        .and_then(|target| target.agent_name)
        .unwrap_or_else(|| "<none>".to_string());
    info!("Forwarding chat request for agent {}", agent);

    relay(Forward::Chat, state.agents_service.chat(body)).await
}

/// GET /api/agents
pub async fn list_agents(State(state): State<AppState>) -> Response {
    relay(Forward::AgentsList, state.agents_service.list_agents()).await
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let agents_service = state.agents_service.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "agents_service": agents_service
    }))
}
