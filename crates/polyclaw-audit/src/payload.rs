//! Payload normalization for audit records.
//!
//! The logger persists one JSON object per event, but domain code wants to
//! log whatever it has on hand: a typed record, an ad-hoc map, sometimes a
//! bare string or number. `AuditPayload` closes that gap with a single
//! capability: produce a key/value map.

use serde::Serialize;
use serde_json::{Map, Value};

/// Capability of being logged as a structured audit payload.
///
/// Implemented automatically for every `Serialize` type:
/// - a record type serializes to the map of its named fields
/// - a map type passes through unchanged
/// - anything else degrades to a single-entry `{"value": <string form>}`
pub trait AuditPayload {
    /// Normalize into the map shape the audit logger persists.
    fn to_payload(&self) -> Map<String, Value>;
}

impl<T: Serialize> AuditPayload for T {
    fn to_payload(&self) -> Map<String, Value> {
        let value = match serde_json::to_value(self) {
            Ok(v) => v,
            // Normalization is total: a value that cannot serialize still
            // yields a loggable map carrying the failure text.
            Err(e) => Value::String(format!("<unserializable: {e}>")),
        };

        match value {
            Value::Object(map) => map,
            other => {
                let rendered = match other {
                    Value::String(s) => s,
                    v => v.to_string(),
                };
                let mut map = Map::new();
                map.insert("value".to_string(), Value::String(rendered));
                map
            }
        }
    }
}
