//! User registry handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::response::Envelope;
use crate::state::AppState;

/// Every user in the document store.
///
/// A missing or broken store yields an empty list and a 500 rather than
/// an error body with no data field.
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.users.list_users().await {
        Ok(users) => {
            let count = users.len();
            (
                StatusCode::OK,
                Json(Envelope::ok("Users retrieved", users).with_count(count)),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::fail("Failed to list users", Vec::new())),
        ),
    }
}

/// Stub: echoes the requested id without querying the store.
pub async fn get_user(Path(user_id): Path<String>) -> Json<Envelope<serde_json::Value>> {
    Json(Envelope::ok(
        format!("User {} details", user_id),
        json!({ "id": user_id }),
    ))
}
