#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use agents_ui_proxy::agents_service::AgentsServiceClient;
use agents_ui_proxy::config::Config;
use agents_ui_proxy::routes;
use agents_ui_proxy::state::AppState;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request as MockRequest, Respond, ResponseTemplate};

/// Stand-in for the agents service.
pub struct AgentsMockServer {
    server: MockServer,
}

impl AgentsMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn mock_agents_list(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/agents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_chat(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_chat_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_agents_error(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/agents"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Chat endpoint that answers only after `delay`.
    pub async fn mock_slow_chat(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "too late" }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_slow_agents(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/agents"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "agents": [] }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Agents endpoint answering `status` with no body.
    pub async fn mock_agents_empty(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/agents"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Chat endpoint returning `body` byte for byte as JSON.
    pub async fn mock_chat_json_text(&self, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_slow_health(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "healthy" }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Chat endpoint that echoes the request's `correlation_id` back.
    pub async fn mock_echo_chat(&self) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(EchoChat)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_health(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "status": "healthy",
                "service": "ai-agent-service"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }

    pub async fn received_raw(&self) -> Vec<(Option<String>, Vec<u8>)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                let content_type = r
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (content_type, r.body)
            })
            .collect()
    }
}

struct EchoChat;

impl Respond for EchoChat {
    fn respond(&self, request: &MockRequest) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(json!({
            "agent_name": body["agent_name"],
            "response": format!("echo: {}", body["message"].as_str().unwrap_or_default()),
            "correlation_id": body["correlation_id"],
            "tools_used": [],
            "model_used": "qwen3-small"
        }))
    }
}

/// An address nothing is listening on.
pub async fn unreachable_uri() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn ui_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

pub fn test_app(agents_url: &str, static_dir: &Path) -> Router {
    test_app_with_timeout(agents_url, static_dir, Duration::from_secs(5))
}

pub fn test_app_with_timeout(agents_url: &str, static_dir: &Path, timeout: Duration) -> Router {
    let config = Config {
        agents_url: agents_url.to_string(),
        static_dir: static_dir.to_path_buf(),
        ..Config::default()
    };
    let client = AgentsServiceClient::new(agents_url, timeout).unwrap();
    routes::app(AppState::with_agents_service(config, client))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
