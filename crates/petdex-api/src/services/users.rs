//! User directory over the document store.

use std::sync::Arc;

use tracing::error;

use petdex_firestore::{FirestoreClient, UserRepository};

use crate::error::{ApiError, ApiResult};

/// Read-only listing of the user registry.
///
/// The store is optional: when it was not configured at startup, listing
/// fails the same way a broken connection does.
#[derive(Clone)]
pub struct UserDirectoryService {
    firestore: Option<Arc<FirestoreClient>>,
}

impl UserDirectoryService {
    pub fn new(firestore: Option<Arc<FirestoreClient>>) -> Self {
        Self { firestore }
    }

    pub fn is_connected(&self) -> bool {
        self.firestore.is_some()
    }

    /// Every user document, fields spread alongside the document id.
    /// No filtering and no pagination at this layer.
    pub async fn list_users(&self) -> ApiResult<Vec<serde_json::Value>> {
        let Some(client) = &self.firestore else {
            error!("User registry requested but the document store is not configured");
            return Err(ApiError::internal("Document store is not configured"));
        };

        let repository = UserRepository::new((**client).clone());
        repository.list_all().await.map_err(|e| {
            error!("Failed to list users: {}", e);
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_store_reports_an_internal_error() {
        let service = UserDirectoryService::new(None);
        assert!(!service.is_connected());
        assert!(matches!(
            service.list_users().await,
            Err(ApiError::Internal(_))
        ));
    }
}
