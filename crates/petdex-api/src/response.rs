//! Uniform response envelope.

use serde::Serialize;

/// The `{success, message, data}` wrapper every endpoint returns.
///
/// `count` and `filters_applied` appear only on the endpoints that define
/// them; pagination metadata lives inside `data` next to the items it
/// describes.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_applied: Option<serde_json::Value>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            count: None,
            filters_applied: None,
        }
    }

    pub fn fail(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
            count: None,
            filters_applied: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_filters(mut self, filters: serde_json::Value) -> Self {
        self.filters_applied = Some(filters);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted_unless_set() {
        let rendered = serde_json::to_value(Envelope::ok("done", json!([]))).unwrap();
        assert_eq!(rendered["success"], json!(true));
        assert!(rendered.get("count").is_none());
        assert!(rendered.get("filters_applied").is_none());
    }

    #[test]
    fn count_and_filters_serialize_when_present() {
        let envelope = Envelope::ok("done", json!([1, 2]))
            .with_count(2)
            .with_filters(json!({ "size": "small" }));

        let rendered = serde_json::to_value(envelope).unwrap();
        assert_eq!(rendered["count"], json!(2));
        assert_eq!(rendered["filters_applied"]["size"], json!("small"));
    }

    #[test]
    fn failure_envelope_carries_null_data() {
        let envelope = Envelope::fail("missing", serde_json::Value::Null);
        let rendered = serde_json::to_value(envelope).unwrap();
        assert_eq!(rendered["success"], json!(false));
        assert_eq!(rendered["data"], json!(null));
    }
}
