//! Service index and health handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Index response.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Service name.
    pub name: String,
    /// API version.
    pub version: String,
    /// Path of the accounts collection.
    pub url: String,
}

/// Describe the service.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Banking System REST API Service".to_string(),
        version: "1.0".to_string(),
        url: "/accounts".to_string(),
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint. Answers 503 when the store does not respond.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    state.store.ping()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        service: "accounts".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".into())
}
