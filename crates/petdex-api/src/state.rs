//! Application state.

use std::sync::Arc;

use tracing::warn;

use petdex_breed_client::{BreedApiClient, BreedApiConfig};
use petdex_firestore::FirestoreClient;
use petdex_models::Species;

use crate::config::ApiConfig;
use crate::services::{BreedCache, BreedDirectoryService, UserDirectoryService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub dogs: BreedDirectoryService,
    pub cats: BreedDirectoryService,
    pub users: UserDirectoryService,
}

impl AppState {
    /// Create application state from the environment.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let dog_client = BreedApiClient::new(BreedApiConfig::dog_from_env())?;
        let cat_client = BreedApiClient::new(BreedApiConfig::cat_from_env())?;

        // The store is optional at startup: /api/users degrades to a 500
        // instead of keeping the whole service down.
        let firestore = match FirestoreClient::from_env().await {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Firestore unavailable, user registry disabled: {}", e);
                None
            }
        };

        Ok(Self::with_clients(config, dog_client, cat_client, firestore))
    }

    /// Assemble state from prebuilt clients. Tests use this to point the
    /// services at mock upstreams.
    pub fn with_clients(
        config: ApiConfig,
        dog_client: BreedApiClient,
        cat_client: BreedApiClient,
        firestore: Option<Arc<FirestoreClient>>,
    ) -> Self {
        let dogs = BreedDirectoryService::new(
            Species::Dog,
            Arc::new(dog_client),
            Arc::new(BreedCache::new(config.breed_cache_ttl)),
            config.enrichment,
        );
        let cats = BreedDirectoryService::new(
            Species::Cat,
            Arc::new(cat_client),
            Arc::new(BreedCache::new(config.breed_cache_ttl)),
            config.enrichment,
        );
        let users = UserDirectoryService::new(firestore);

        Self {
            config,
            dogs,
            cats,
            users,
        }
    }
}
