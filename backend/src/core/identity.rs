//! Record identity and content fingerprints
//!
//! Row identities are opaque UUID strings. They exist only for referential
//! integrity inside a scenario (edit/delete a specific step) and carry no
//! ordering or business meaning.
//!
//! Content fingerprints are SHA-256 digests of a canonical JSON form, so two
//! structurally equal values always hash the same regardless of map order.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Generate a fresh record identity
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Compute the SHA-256 hex digest of a value's canonical JSON form
///
/// Object keys are sorted recursively before hashing.
///
/// # Errors
/// Returns the serde_json error if the value cannot be serialized.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(serde_json::to_value(value)?);
    let json = serde_json::to_string(&canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn test_hash_ignores_key_order() {
        let a = json!({"b": 1, "a": {"y": 2, "x": 3}});
        let b = json!({"a": {"x": 3, "y": 2}, "b": 1});
        assert_eq!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = json!({"duration": 1.0});
        let b = json!({"duration": 2.0});
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = content_hash(&json!([])).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
