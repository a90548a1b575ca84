use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info_span;
use uuid::Uuid;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let config = &state.config;

    Router::new()
        // Agents service proxy
        .route("/api/chat", post(handlers::chat))
        .route("/api/agents", get(handlers::list_agents))
        .route("/api/health", get(handlers::health_check))
        // UI
        .route_service("/", ServeFile::new(config.index_path()))
        .fallback_service(ServeDir::new(&config.static_dir))
}

/// The full application: routes, middleware and state.
pub fn app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .merge(create_routes(&state))
        .layer(trace)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
