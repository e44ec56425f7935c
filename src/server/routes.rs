//! Axum route handlers for the verse agent HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`                       — Liveness probe with corpus size
//! - `GET  /.well-known/agent.json`       — Agent card
//! - `GET  /.well-known/agent-card.json`  — Agent card (A2A default path)
//! - `POST /`                             — JSON-RPC `message/send`

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::a2a::card::AgentCard;
use crate::a2a::types::JsonRpcResponse;
use crate::agent::VerseAgent;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Request handler; owns the read-only corpus.
    pub agent: Arc<VerseAgent>,
    /// Static capability manifest.
    pub card: Arc<AgentCard>,
}

impl AppState {
    pub fn new(agent: VerseAgent, card: AgentCard) -> Self {
        Self {
            agent: Arc::new(agent),
            card: Arc::new(card),
        }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(rpc_handler))
        .route("/health", get(health_handler))
        .route("/.well-known/agent.json", get(agent_card_handler))
        .route("/.well-known/agent-card.json", get(agent_card_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let verses = state.agent.corpus().len();
    let status = if verses > 0 { "ok" } else { "degraded" };
    Json(serde_json::json!({
        "status": status,
        "version": crate::VERSION,
        "service": "verse-agent",
        "verses": verses,
    }))
}

/// GET /.well-known/agent.json — capability discovery.
async fn agent_card_handler(State(state): State<AppState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

/// POST / — JSON-RPC endpoint.
///
/// The body is taken raw so malformed JSON still gets a JSON-RPC error
/// object (HTTP 200) instead of an extractor rejection.
async fn rpc_handler(State(state): State<AppState>, body: Bytes) -> Json<JsonRpcResponse> {
    let response = state.agent.handle_json(&body).await;
    if let Some(ref error) = response.error {
        tracing::debug!(code = error.code, "JSON-RPC error response: {}", error.message);
    }
    Json(response)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
