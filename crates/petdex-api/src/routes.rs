//! API routes.

use axum::routing::get;
use axum::{middleware, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::handlers::{cats, dogs, health, users};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let dog_routes = Router::new()
        // Composed paginated list with images
        .route("/dogs", get(dogs::list_dogs))
        .route("/dogs/breeds", get(dogs::get_all_breeds))
        .route("/dogs/breeds-with-images", get(dogs::get_breeds_with_images))
        .route("/dogs/breeds/filter", get(dogs::filter_breeds))
        .route("/dogs/breeds/:breed_id", get(dogs::get_breed))
        .route("/dogs/breeds/:breed_id/images", get(dogs::get_breed_images))
        .route("/dogs/random-image", get(dogs::get_random_image));

    let cat_routes = Router::new()
        .route("/cats/breeds", get(cats::get_all_breeds))
        .route("/cats/breeds/:breed_id", get(cats::get_breed));

    let user_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:user_id", get(users::get_user));

    let api_routes = Router::new()
        .merge(dog_routes)
        .merge(cat_routes)
        .merge(user_routes);

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
