use std::str::FromStr;

use anyhow::{Context, bail};
use kih_db::Direction;
use serde_json::{Map, Value};

/// Parse an enum value, naming the field on failure.
pub fn parse_enum<T>(value: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|error| anyhow::anyhow!("invalid {field} '{value}': {error}"))
}

/// `field=value`; the value is JSON when it parses, a string otherwise.
pub fn parse_pair(raw: &str) -> anyhow::Result<(String, Value)> {
    let Some((field, value)) = raw.split_once('=') else {
        bail!("expected field=value, got '{raw}'");
    };
    let field = field.trim();
    if field.is_empty() {
        bail!("missing field name in '{raw}'");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

/// `field` or `field:asc` / `field:desc`.
pub fn parse_order(raw: &str) -> anyhow::Result<(String, Direction)> {
    let (field, direction) = raw.split_once(':').unwrap_or((raw, "asc"));
    let direction = match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        other => bail!("invalid order direction '{other}' (expected asc or desc)"),
    };
    Ok((field.trim().to_string(), direction))
}

/// A JSON object given on the command line.
pub fn parse_object(raw: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("document body is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("document body must be a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use kih_core::enums::KosType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn enum_error_names_field() {
        assert_eq!(parse_enum::<KosType>("kos", "type").unwrap(), KosType::Kos);
        let err = parse_enum::<KosType>("villa", "type").unwrap_err();
        assert!(err.to_string().contains("invalid type 'villa'"));
    }

    #[rstest]
    #[case("isVerified=true", "isVerified", json!(true))]
    #[case("pricePerMonth=500000", "pricePerMonth", json!(500_000))]
    #[case("type=kos", "type", json!("kos"))]
    #[case("name=Kos = Melati", "name", json!("Kos = Melati"))]
    fn pairs_parse_json_or_string(#[case] raw: &str, #[case] field: &str, #[case] value: Value) {
        assert_eq!(parse_pair(raw).unwrap(), (field.to_string(), value));
    }

    #[test]
    fn pair_needs_field() {
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn order_defaults_to_ascending() {
        assert_eq!(parse_order("name").unwrap(), ("name".into(), Direction::Asc));
        assert_eq!(
            parse_order("createdAt:DESC").unwrap(),
            ("createdAt".into(), Direction::Desc)
        );
        assert!(parse_order("name:sideways").is_err());
    }

    #[test]
    fn object_body_required() {
        assert!(parse_object(r#"{"name":"Elfast"}"#).is_ok());
        assert!(parse_object("[1,2]").is_err());
        assert!(parse_object("{oops").is_err());
    }
}
