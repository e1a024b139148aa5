//! Root and health handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Landing endpoint.
pub async fn index() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        status: "success".to_string(),
        message: "Welcome to the Petdex API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        database: if state.users.is_connected() {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
