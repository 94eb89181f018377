use serde_json::{Map, Value};
use tracing::debug;

/// A document's stored fields, keyed by field name.
///
/// Search hits are normalized into this shape with the engine's `_id`
/// inserted under `id` before the `_source` fields are merged in, so a
/// source field literally named `id` overwrites the engine identifier.
pub type Document = Map<String, Value>;

/// The raw outcome of one HTTP round trip to the engine.
///
/// Overwritten on the owning client after every operation so it can be
/// inspected for diagnostics.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status_code: u16,
    /// Decoded JSON body, or `None` when the body was empty or not JSON
    /// (HEAD responses legitimately carry no body).
    pub body: Option<Value>,
}

impl RawResponse {
    /// Decode raw body bytes leniently: a parse failure yields `None`,
    /// never an error.
    pub fn decode(status_code: u16, raw_body: &[u8]) -> Self {
        let body = match serde_json::from_slice::<Value>(raw_body) {
            Ok(value) => Some(value),
            Err(e) => {
                if !raw_body.is_empty() {
                    debug!("Discarding non-JSON response body: {}", e);
                }
                None
            }
        };
        Self { status_code, body }
    }

    /// Extract the reason from an engine error envelope
    /// (`{"error":{"reason":"..."}}`), if the body carries one.
    pub fn engine_error(&self) -> Option<String> {
        self.body
            .as_ref()?
            .get("error")?
            .get("reason")?
            .as_str()
            .map(|s| s.to_string())
    }

    /// Whether the body contains the engine's administrative
    /// acknowledgement flag set to true.
    pub fn acknowledged(&self) -> bool {
        self.body
            .as_ref()
            .and_then(|b| b.get("acknowledged"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the body carries any content at all (non-null, non-empty).
    pub fn has_content(&self) -> bool {
        match &self.body {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

/// Project a search response body into a flat list of [`Document`] records.
///
/// Hits are converted only when `hits.total.value > 0`; output order matches
/// the engine's hit order and is never re-sorted here.
pub fn normalize_hits(body: &Value) -> Vec<Document> {
    let total = body
        .pointer("/hits/total/value")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    if total <= 0 {
        return Vec::new();
    }

    let hits = match body.pointer("/hits/hits").and_then(Value::as_array) {
        Some(hits) => hits,
        None => return Vec::new(),
    };

    let mut out = Vec::with_capacity(hits.len());
    for hit in hits {
        let mut record = Document::new();
        if let Some(id) = hit.get("_id") {
            record.insert("id".to_string(), id.clone());
        }
        if let Some(source) = hit.get("_source").and_then(Value::as_object) {
            // A `_source` field named `id` overwrites the engine identifier
            for (key, value) in source {
                record.insert(key.clone(), value.clone());
            }
        }
        out.push(record);
    }
    out
}
