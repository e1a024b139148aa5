//! Breed API client error types.

use thiserror::Error;

pub type BreedApiResult<T> = Result<T, BreedApiError>;

#[derive(Debug, Error)]
pub enum BreedApiError {
    #[error("Upstream returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BreedApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BreedApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
