//! Typed repositories, one module per collection.

pub mod course;
pub mod forum;
pub mod kos;
pub mod location;
pub mod reply;

use serde_json::Value;

/// Append `url` to a photo list unless already present.
pub(crate) fn with_photo(mut photos: Vec<String>, url: &str) -> Vec<String> {
    if !photos.iter().any(|p| p == url) {
        photos.push(url.to_string());
    }
    photos
}

pub(crate) fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}
