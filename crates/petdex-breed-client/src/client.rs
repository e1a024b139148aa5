//! Breed API HTTP client.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use petdex_models::ImageRecord;

use crate::config::BreedApiConfig;
use crate::error::{BreedApiError, BreedApiResult};

const REQUESTS_TOTAL: &str = "petdex_upstream_requests_total";

/// Query for the upstream `images/search` endpoint.
#[derive(Debug, Clone, Default)]
pub struct ImageSearchQuery {
    /// Restrict hits to one breed
    pub breed_id: Option<String>,
    /// How many hits to ask for
    pub limit: u32,
}

/// Client for one upstream pet API.
pub struct BreedApiClient {
    http: Client,
    config: BreedApiConfig,
}

impl BreedApiClient {
    /// Create a new client for the given upstream.
    pub fn new(config: BreedApiConfig) -> BreedApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("petdex-breed-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BreedApiError::Network)?;

        Ok(Self { http, config })
    }

    /// CDN host breed records derive their image URLs from.
    pub fn cdn_base(&self) -> &str {
        &self.config.cdn_base
    }

    /// Fetch the full raw breed list (`GET /breeds`).
    pub async fn list_breeds(&self) -> BreedApiResult<Vec<Value>> {
        let url = format!("{}/breeds", self.config.base_url);
        self.get_json(&url, &[]).await
    }

    /// Fetch one raw breed (`GET /breeds/{id}`).
    pub async fn get_breed(&self, breed_id: &str) -> BreedApiResult<Value> {
        let url = format!("{}/breeds/{}", self.config.base_url, breed_id);
        self.get_json(&url, &[]).await
    }

    /// Fetch one image by its reference id (`GET /images/{id}`).
    pub async fn get_image(&self, reference_image_id: &str) -> BreedApiResult<ImageRecord> {
        let url = format!("{}/images/{}", self.config.base_url, reference_image_id);
        self.get_json(&url, &[]).await
    }

    /// Search images in random order (`GET /images/search`).
    pub async fn search_images(&self, query: &ImageSearchQuery) -> BreedApiResult<Vec<ImageRecord>> {
        let url = format!("{}/images/search", self.config.base_url);
        let limit = query.limit.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("size", "med"),
            ("mime_types", "jpg"),
            ("format", "json"),
            ("has_breeds", "true"),
            ("order", "RANDOM"),
            ("page", "0"),
            ("limit", &limit),
        ];
        if let Some(breed_id) = &query.breed_id {
            params.push(("breed_id", breed_id));
        }

        self.get_json(&url, &params).await
    }

    async fn get_json<T>(&self, url: &str, params: &[(&str, &str)]) -> BreedApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {}", url);

        let mut request = self.http.get(url).query(params);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::counter!(REQUESTS_TOTAL, "outcome" => "error").increment(1);
            return Err(BreedApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        metrics::counter!(REQUESTS_TOTAL, "outcome" => "ok").increment(1);
        Ok(response.json().await?)
    }
}
