use crate::agent::CernAgent;
use crate::models::chat::{ ChatRequest, ChatResponse, StatusResponse };
use super::error::ApiError;
use std::sync::Arc;
use axum::{ routing::{ get, post }, Router, extract::State, Json };
use tower_http::cors::{ Any, CorsLayer };
use log::info;

pub const STATUS_MESSAGE: &str = "Cern API is online.";

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<CernAgent>,
}

pub fn router(agent: Arc<CernAgent>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(status_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState { agent })
}

async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse { status: STATUS_MESSAGE.to_string() })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>
) -> Result<Json<ChatResponse>, ApiError> {
    info!("Chat request: {} history entries", req.history.len());
    let processed = state.agent.respond(&req).await?;
    Ok(Json(processed.into()))
}
