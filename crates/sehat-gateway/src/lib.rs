//! HTTP gateway — the public face of SehatBot.
//!
//! One JSON endpoint (`POST /api/chat`) plus a liveness probe
//! (`GET /health`). The chat handler validates the request, screens the
//! query for topical fit, routes accepted queries through the provider
//! chain, logs both turns best-effort, and always answers 200 with a reply
//! body — a reply is owed even when every remote provider is down.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use sehat_core::{apology, BotReply, ChatQuery, Language};
use sehat_providers::QueryRouter;
use sehat_responder::screen;
use sehat_storage::{ChatLogRepository, ChatTurn, Store};

// ─────────────────────────────────────────────
// State & router
// ─────────────────────────────────────────────

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<QueryRouter>,
    pub store: Arc<Store>,
}

/// Build the axum router with CORS and request tracing.
///
/// CORS is wide open on purpose: the web client is served from a different
/// origin in every deployment we know of.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

/// Incoming chat request. `query` is canonical; `message` is accepted as an
/// alias for older clients.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequest {
    pub query: Option<String>,
    pub message: Option<String>,
    pub is_voice_input: bool,
    pub detected_language: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// The query text, honoring the legacy `message` alias.
    fn text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Successful chat response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub confidence: f32,
    pub language: &'static str,
    pub category: &'static str,
    pub provider: &'static str,
    pub timestamp: String,
    pub session_id: String,
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "भारतीय स्वास्थ्य सहायक बैकएंड सेवा",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/chat": "POST - Process health queries",
            "/health": "GET - Health check",
        },
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sehatbot",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(text) = request.text() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Query is required" })),
        )
            .into_response();
    };

    let language = Language::from_tag(request.detected_language.as_deref());

    match handle_chat(&state, &request, text, language).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            warn!(error = %e, "Chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": e.to_string(),
                    "message": apology(language),
                })),
            )
                .into_response()
        }
    }
}

async fn handle_chat(
    state: &AppState,
    request: &ChatRequest,
    text: &str,
    language: Language,
) -> anyhow::Result<ChatResponse> {
    let session_id = request
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let query = ChatQuery {
        text: text.to_string(),
        language,
        is_voice_input: request.is_voice_input,
        user_id: request.user_id.clone(),
        session_id,
    };

    // The user turn goes in before any provider round trip: a request
    // dropped mid-route must not lose what the user said.
    log_turn(&state.store, ChatTurn::user_turn(&query)).await;

    let (reply, category) = match screen(&query.text) {
        sehat_core::Screening::Redirect(message) => {
            (BotReply::from_fallback(message, language), "redirect")
        }
        sehat_core::Screening::Accepted => (state.router.answer(&query).await, "health"),
    };

    log_turn(&state.store, ChatTurn::bot_turn(&query, &reply, category)).await;

    Ok(ChatResponse {
        message: reply.message,
        confidence: reply.confidence,
        language: reply.language.as_tag(),
        category,
        provider: reply.source.as_str(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        session_id: query.session_id,
    })
}

/// Best-effort persistence: a broken database must never block a reply.
async fn log_turn(store: &Store, turn: ChatTurn) {
    if let Err(e) = store.append_turn(turn).await {
        warn!(error = %e, "Failed to log chat turn");
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
