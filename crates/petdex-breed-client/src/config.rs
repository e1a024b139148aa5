//! Upstream API configuration.

use std::time::Duration;

/// Connection settings for one upstream pet API.
#[derive(Debug, Clone)]
pub struct BreedApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// API key sent as `x-api-key` when the upstream wants one
    pub api_key: Option<String>,
    /// CDN host used to derive image URLs from reference image ids
    pub cdn_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl BreedApiConfig {
    /// Dog API settings from environment variables.
    pub fn dog_from_env() -> Self {
        Self {
            base_url: base_url_env("DOG_API_BASE_URL", "https://api.thedogapi.com/v1"),
            api_key: Some(
                std::env::var("DOG_API_KEY").unwrap_or_else(|_| "DEMO-API-KEY".to_string()),
            ),
            cdn_base: "https://cdn2.thedogapi.com".to_string(),
            timeout: request_timeout(),
        }
    }

    /// Cat API settings from environment variables.
    pub fn cat_from_env() -> Self {
        Self {
            base_url: base_url_env("CAT_API_BASE_URL", "https://api.thecatapi.com/v1"),
            api_key: std::env::var("CAT_API_KEY").ok(),
            cdn_base: "https://cdn2.thecatapi.com".to_string(),
            timeout: request_timeout(),
        }
    }
}

fn base_url_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| default.to_string())
}

fn request_timeout() -> Duration {
    Duration::from_secs(
        std::env::var("BREED_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15),
    )
}
