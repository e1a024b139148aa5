//! Read-only repository over the user registry collection.

use tracing::info;

use crate::client::FirestoreClient;
use crate::error::FirestoreResult;
use crate::types::{value_to_json, Document};

const USERS_COLLECTION: &str = "users";
const LIST_PAGE_SIZE: u32 = 300;

/// Read-only access to user documents.
pub struct UserRepository {
    client: FirestoreClient,
}

impl UserRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    /// List every user document, spreading its fields alongside the
    /// document id. Follows `nextPageToken` until the collection is
    /// exhausted.
    pub async fn list_all(&self) -> FirestoreResult<Vec<serde_json::Value>> {
        let mut users = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_documents(USERS_COLLECTION, Some(LIST_PAGE_SIZE), page_token.as_deref())
                .await?;

            for document in response.documents.unwrap_or_default() {
                users.push(document_to_user(&document));
            }

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!("Listed {} user documents", users.len());
        Ok(users)
    }
}

/// `{"id": <doc id>, ...fields}` — a field literally named `id` wins over
/// the document id, matching the spread order the API promises.
fn document_to_user(document: &Document) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    object.insert(
        "id".to_string(),
        serde_json::Value::String(document.doc_id().to_string()),
    );

    if let Some(fields) = &document.fields {
        for (key, value) in fields {
            object.insert(key.clone(), value_to_json(value));
        }
    }

    serde_json::Value::Object(object)
}
