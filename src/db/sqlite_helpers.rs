//! SQLite helper utilities for type conversion
//!
//! SQLite has no native array or timestamp types, so vectors are stored
//! as JSON strings and timestamps as ISO-8601 text.

use serde::{de::DeserializeOwned, Serialize};

/// Current UTC time as an ISO-8601 string for SQLite storage
#[inline]
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Serialize a slice to a JSON string for SQLite storage
#[inline]
pub fn vec_to_json<T: Serialize>(v: &[T]) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a JSON string from SQLite to a Vec
#[inline]
pub fn json_to_vec<T: DeserializeOwned>(s: &str) -> Vec<T> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_json_round_trip() {
        let ids = vec![28i64, 12, 878];
        let json = vec_to_json(&ids);
        assert_eq!(json_to_vec::<i64>(&json), ids);
    }

    #[test]
    fn json_to_vec_tolerates_garbage() {
        let empty: Vec<i64> = json_to_vec("not json");
        assert!(empty.is_empty());
    }
}
