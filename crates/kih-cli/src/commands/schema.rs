use anyhow::bail;
use kih_core::entities::{CourseInstitution, ForumPost, KosHomestay, Location, Reply};
use kih_core::identity::UserSnapshot;
use schemars::schema_for;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `kih schema`.
pub const TYPE_NAMES: &[&str] = &["course", "kos", "post", "reply", "location", "user"];

/// Handle `kih schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_of(&args.type_name)?, flags.format)
}

/// JSON Schema for one entity type.
pub fn schema_of(type_name: &str) -> anyhow::Result<Value> {
    let schema = match type_name.trim().to_ascii_lowercase().as_str() {
        "course" => schema_for!(CourseInstitution),
        "kos" => schema_for!(KosHomestay),
        "post" => schema_for!(ForumPost),
        "reply" => schema_for!(Reply),
        "location" => schema_for!(Location),
        "user" => schema_for!(UserSnapshot),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use kih_core::forum::NewPost;
    use serde_json::json;

    use super::*;

    fn errors(schema: &Value, instance: &Value) -> Vec<String> {
        let validator = jsonschema::validator_for(schema).expect("schema should compile");
        validator.iter_errors(instance).map(|e| e.to_string()).collect()
    }

    #[test]
    fn every_type_name_has_a_schema() {
        for name in TYPE_NAMES {
            let schema = schema_of(name).unwrap();
            assert!(schema.get("properties").is_some(), "{name} has no properties");
        }
        assert!(schema_of("User").is_ok());
        assert!(schema_of("review").is_err());
    }

    #[test]
    fn composed_post_matches_post_schema() {
        let author = UserSnapshot {
            uid: "uid-siti".into(),
            email: None,
            display_name: Some("Siti".into()),
            photo_url: None,
        };
        let post: ForumPost = NewPost::compose(&author, "Ada info kos dekat BEC?")
            .unwrap()
            .into();
        let instance = serde_json::to_value(&post).unwrap();
        assert_eq!(errors(&schema_of("post").unwrap(), &instance), Vec::<String>::new());
    }

    #[test]
    fn location_schema_rejects_wrong_types() {
        let instance = json!({
            "id": "loc1",
            "name": "Masjid Agung",
            "description": "",
            "category": "mosque",
            "address": "Jl. Pahlawan",
            "latitude": "south",
            "longitude": 112.18
        });
        assert!(!errors(&schema_of("location").unwrap(), &instance).is_empty());
    }
}
