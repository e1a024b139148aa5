//! Normalized breed records and the upstream-payload normalizer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which upstream pet API a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }
}

/// A weight or height range in both unit systems, kept as the upstream's
/// free text (`"<low> - <high>"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub imperial: String,
    #[serde(default)]
    pub metric: String,
}

/// One breed in the shape every endpoint returns.
///
/// Dog records carry `height`, `bred_for` and `breed_group`; cat records
/// carry `hairless`. The other species' fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    pub id: String,
    pub name: String,
    pub temperament: String,
    pub life_span: String,
    pub origin: String,
    pub description: String,
    pub weight: Measurement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bred_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hairless: Option<i64>,
    pub energy_level: i64,
    pub intelligence: i64,
    pub reference_image_id: String,
    pub image_url: String,
}

impl BreedRecord {
    /// Reshape one raw upstream breed object into the fixed output shape.
    ///
    /// Every missing or wrong-typed field degrades to its default; this
    /// never fails. The derived `image_url` is pure string construction
    /// from `reference_image_id` — no request is made here, and the real
    /// per-breed image fetch overwrites it when enrichment runs.
    pub fn from_raw(species: Species, raw: &Value, cdn_base: &str) -> Self {
        let reference_image_id = str_field(raw, "reference_image_id");
        let image_url = if reference_image_id.is_empty() {
            String::new()
        } else {
            format!("{}/images/{}.jpg", cdn_base, reference_image_id)
        };

        let mut record = Self {
            id: id_field(raw),
            name: str_field(raw, "name"),
            temperament: str_field(raw, "temperament"),
            life_span: str_field(raw, "life_span"),
            origin: str_field(raw, "origin"),
            description: str_field(raw, "description"),
            weight: measurement_field(raw, "weight"),
            height: None,
            bred_for: None,
            breed_group: None,
            hairless: None,
            energy_level: int_field(raw, "energy_level"),
            intelligence: int_field(raw, "intelligence"),
            reference_image_id,
            image_url,
        };

        match species {
            Species::Dog => {
                record.height = Some(measurement_field(raw, "height"));
                record.bred_for = Some(str_field(raw, "bred_for"));
                record.breed_group = Some(str_field(raw, "breed_group"));
            }
            Species::Cat => {
                record.hairless = Some(int_field(raw, "hairless"));
            }
        }

        record
    }
}

/// Upstream ids are strings for cats and integers for dogs; both normalize
/// to a string.
fn id_field(raw: &Value) -> String {
    match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn str_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn int_field(raw: &Value, key: &str) -> i64 {
    raw.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn measurement_field(raw: &Value, key: &str) -> Measurement {
    let range = |unit: &str| {
        raw.get(key)
            .and_then(|m| m.get(unit))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Measurement {
        imperial: range("imperial"),
        metric: range("metric"),
    }
}
