//! Axum HTTP API server.
//!
//! This crate provides:
//! - REST endpoints proxying the upstream dog and cat breed APIs
//! - Local breed filtering, pagination, and image enrichment
//! - A read-only user registry backed by Firestore

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use response::Envelope;
pub use routes::create_router;
pub use services::{BreedCache, BreedDirectoryService, ImageEnrichment, UserDirectoryService};
pub use state::AppState;
