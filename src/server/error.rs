//! Request-level error type for the HTTP API.
//!
//! Provider failures are logged in full but surface to the caller only as a
//! generic message, so nothing about the backing model leaks.

use axum::http::StatusCode;
use axum::response::{ IntoResponse, Response };
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::llm::chat::ProviderError;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong on the server.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("completion provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Provider(e) => error!("Error in /api/chat: {}", e),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERIC_ERROR_MESSAGE })),
        ).into_response()
    }
}
