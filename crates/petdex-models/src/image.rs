//! Upstream image payloads.

use serde::{Deserialize, Serialize};

/// One image as returned by the upstream `images` endpoints.
///
/// Parsed leniently: upstream omits dimensions for some records, and the
/// attached breed summaries are passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breeds: Vec<serde_json::Value>,
}
