//! Dog breed API handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use petdex_models::{BreedFilter, BreedRecord, ImageRecord};

use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

/// All dog breeds, normalized.
pub async fn get_all_breeds(State(state): State<AppState>) -> Json<Envelope<Vec<BreedRecord>>> {
    let breeds = state.dogs.all_breeds().await;
    let count = breeds.len();
    Json(Envelope::ok("Dog breeds retrieved", breeds).with_count(count))
}

/// All dog breeds with their representative image attached.
pub async fn get_breeds_with_images(
    State(state): State<AppState>,
) -> Json<Envelope<Vec<BreedRecord>>> {
    let breeds = state.dogs.breeds_with_images().await;
    let count = breeds.len();
    Json(Envelope::ok("Dog breeds with images retrieved", breeds).with_count(count))
}

/// Query parameters accepted by the filter endpoint.
///
/// Numeric values arrive as strings and parse leniently: an unparseable
/// value behaves like an absent filter.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    size: Option<String>,
    energy_level: Option<String>,
    intelligence: Option<String>,
    breed_group: Option<String>,
    temperament: Option<String>,
}

impl FilterParams {
    fn to_filter(&self) -> BreedFilter {
        // An empty string (`?size=`) counts as absent, like any other
        // unusable value.
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        BreedFilter {
            size: non_empty(&self.size),
            energy_level: self.energy_level.as_deref().and_then(|v| v.parse().ok()),
            intelligence: self.intelligence.as_deref().and_then(|v| v.parse().ok()),
            breed_group: non_empty(&self.breed_group),
            temperament: non_empty(&self.temperament),
        }
    }

    fn echo(&self, filter: &BreedFilter) -> serde_json::Value {
        json!({
            "size": filter.size,
            "energy_level": filter.energy_level,
            "intelligence": filter.intelligence,
            "breed_group": filter.breed_group,
            "temperament": filter.temperament,
        })
    }
}

/// Filtered subset of the dog breeds; echoes the applied filters.
pub async fn filter_breeds(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Json<Envelope<Vec<BreedRecord>>> {
    let filter = params.to_filter();
    let breeds = state.dogs.filter_breeds(&filter).await;
    let count = breeds.len();

    Json(
        Envelope::ok("Filtered dog breeds retrieved", breeds)
            .with_count(count)
            .with_filters(params.echo(&filter)),
    )
}

/// One dog breed by id, or 404.
pub async fn get_breed(
    State(state): State<AppState>,
    Path(breed_id): Path<String>,
) -> ApiResult<Json<Envelope<BreedRecord>>> {
    match state.dogs.breed_by_id(&breed_id).await {
        Some(breed) => Ok(Json(Envelope::ok("Breed retrieved", breed))),
        None => Err(ApiError::not_found("Breed not found")),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ImagesParams {
    limit: Option<String>,
}

/// Random images of one breed.
///
/// 404 when the breed is unknown. `limit` defaults to 5 and values
/// outside 1..=10 silently reset to the default.
pub async fn get_breed_images(
    State(state): State<AppState>,
    Path(breed_id): Path<String>,
    Query(params): Query<ImagesParams>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let Some(breed) = state.dogs.breed_by_id(&breed_id).await else {
        return Err(ApiError::not_found("Breed not found"));
    };

    let limit = match params.limit.as_deref().and_then(|v| v.parse::<i64>().ok()) {
        Some(limit) if (1..=10).contains(&limit) => limit as usize,
        _ => 5,
    };

    let images = state.dogs.images_for_breed(&breed_id, limit).await;
    let count = images.len();

    Ok(Json(
        Envelope::ok(
            format!("Images for breed {} retrieved", breed.name),
            json!({ "breed": breed, "images": images }),
        )
        .with_count(count),
    ))
}

/// One random dog image with breed metadata, or 404.
pub async fn get_random_image(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<ImageRecord>>> {
    match state.dogs.random_image().await {
        Some(image) => Ok(Json(Envelope::ok("Random image retrieved", image))),
        None => Err(ApiError::not_found("Could not fetch a random image")),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    limit: Option<String>,
    page: Option<String>,
}

/// Paginated dog list with images, the composed endpoint.
///
/// `limit` is optional (all breeds when absent); `limit < 1` or
/// `page < 1` is rejected here, before any engine runs.
pub async fn list_dogs(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let limit = match params.limit.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(limit) if limit >= 1 => Some(limit as usize),
            _ => return Err(ApiError::bad_request("limit must be an integer >= 1")),
        },
    };

    let page = match params.page.as_deref() {
        None => 1,
        Some(raw) => match raw.parse::<i64>() {
            Ok(page) if page >= 1 => page as usize,
            _ => return Err(ApiError::bad_request("page must be an integer >= 1")),
        },
    };

    let result = state.dogs.paged_breeds_with_images(limit, page).await?;

    Ok(Json(Envelope::ok(
        "Dog list retrieved",
        json!({
            "dogs": result.items,
            "pagination": {
                "total": result.total,
                "page": result.page,
                "limit": result.limit,
                "total_pages": result.total_pages,
            }
        }),
    )))
}
