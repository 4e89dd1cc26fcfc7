//! Row and JSON conversion helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DatabaseError;

/// Keys owned by the store; stripped from every body before writing.
pub const RESERVED_KEYS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Parse a TEXT timestamp column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-10-17T09:30:00.125Z"`) and `SQLite`'s
/// default format (`"2026-10-17 09:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Serialize an entity or update into a JSON object body without the
/// store-owned keys.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the value is not a JSON object.
pub fn to_body<T: Serialize>(value: &T) -> Result<Map<String, Value>, DatabaseError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(strip_reserved(map)),
        other => Err(DatabaseError::InvalidState(format!(
            "document body must be a JSON object, got {other}"
        ))),
    }
}

/// Drop `id`, `createdAt`, `updatedAt` from a body.
#[must_use]
pub fn strip_reserved(mut body: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_KEYS {
        body.remove(*key);
    }
    body
}

/// Whether `field` is safe to embed in a JSON path (`$.a.b`).
#[must_use]
pub fn is_valid_field_path(field: &str) -> bool {
    !field.is_empty()
        && !field.starts_with('.')
        && !field.ends_with('.')
        && !field.contains("..")
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_store_timestamp() {
        let dt = parse_datetime("2026-10-17T09:30:00.125Z").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 125);
        assert!(parse_datetime("2026-10-17 09:30:00").is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn body_drops_reserved_keys() {
        let body = to_body(&serde_json::json!({
            "id": "abc",
            "name": "Elfast",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body["name"], "Elfast");
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(to_body(&vec![1, 2, 3]).is_err());
    }

    #[rstest]
    #[case("name", true)]
    #[case("address.city", true)]
    #[case("price_range", true)]
    #[case("", false)]
    #[case("name') OR 1=1 --", false)]
    #[case("a..b", false)]
    #[case(".name", false)]
    fn field_path_validation(#[case] field: &str, #[case] ok: bool) {
        assert_eq!(is_valid_field_path(field), ok);
    }
}
