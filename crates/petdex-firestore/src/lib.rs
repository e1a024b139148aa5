//! Firestore REST API client.
//!
//! This crate provides:
//! - Service account authentication via gcp_auth with token caching
//! - Document get/list over the Firestore REST API
//! - A read-only repository over the user registry collection

pub mod client;
pub mod error;
pub mod token_cache;
pub mod types;
pub mod users;

pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use types::{value_to_json, Document, ListDocumentsResponse, Value};
pub use users::UserRepository;
