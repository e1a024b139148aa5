//! Cat breed API handlers.
//!
//! Cats mirror the basic dog endpoints; there is no filter or pagination
//! variant for them.

use axum::extract::{Path, State};
use axum::Json;

use petdex_models::BreedRecord;

use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

/// All cat breeds, normalized.
pub async fn get_all_breeds(State(state): State<AppState>) -> Json<Envelope<Vec<BreedRecord>>> {
    let breeds = state.cats.all_breeds().await;
    let count = breeds.len();
    Json(Envelope::ok("Cat breeds retrieved", breeds).with_count(count))
}

/// One cat breed by id, or 404.
pub async fn get_breed(
    State(state): State<AppState>,
    Path(breed_id): Path<String>,
) -> ApiResult<Json<Envelope<BreedRecord>>> {
    match state.cats.breed_by_id(&breed_id).await {
        Some(breed) => Ok(Json(Envelope::ok("Breed retrieved", breed))),
        None => Err(ApiError::not_found("Breed not found")),
    }
}
