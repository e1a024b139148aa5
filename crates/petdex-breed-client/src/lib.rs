//! HTTP client for the upstream pet-data APIs.
//!
//! One client type serves both TheDogAPI and TheCatAPI; the config decides
//! which upstream (base URL, API key, CDN host) a given instance talks to.

pub mod client;
pub mod config;
pub mod error;

pub use client::{BreedApiClient, ImageSearchQuery};
pub use config::BreedApiConfig;
pub use error::{BreedApiError, BreedApiResult};
