use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

use crate::math::round_to;

const FLOAT_PLACES: i32 = 8;

/// Recursively sorts object keys and rounds non-integer numbers to 8 places.
pub fn canonicalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys = map.keys().cloned().collect::<Vec<_>>();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                if let Some(item) = map.get(&key) {
                    sorted.insert(key, canonicalize_json(item));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize_json).collect()),
        Value::Number(number) if number.is_f64() => number
            .as_f64()
            .and_then(|float| Number::from_f64(round_to(float, FLOAT_PLACES)))
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        primitive => primitive.clone(),
    }
}

/// Compact, key-sorted serialization used for hashing.
pub fn canonical_json(value: &Value) -> String {
    canonicalize_json(value).to_string()
}

/// Lowercase hex SHA-256 of [`canonical_json`].
pub fn canonical_hash(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(value).as_bytes());
    let digest = hasher.finalize();
    format!("{:x}", digest)
}
