//! Object key construction.

use kih_core::enums::Collection;

/// Replace anything outside `[A-Za-z0-9._-]` with `_`, collapsing runs.
/// Never returns an empty string; capped at 128 bytes.
#[must_use]
pub fn sanitize_segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;

    for ch in input.chars() {
        let keep = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_';
        if keep {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let sanitized = out
        .trim_start_matches(|c: char| c == '_' || c == '.')
        .trim_end_matches('_');
    if sanitized.is_empty() {
        return "_".to_string();
    }

    let mut capped = sanitized.to_string();
    capped.truncate(128);
    capped
}

/// `{collection}/{listing id}/{tag}-{file name}` with each segment sanitized.
/// `tag` keeps two uploads of the same file name apart.
#[must_use]
pub fn object_key(collection: Collection, listing_id: &str, tag: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}-{}",
        collection.as_str(),
        sanitize_segment(listing_id),
        sanitize_segment(tag),
        sanitize_segment(file_name)
    )
}

/// Eight random hex characters.
pub fn upload_tag() -> Result<String, getrandom::Error> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_collapses_and_trims() {
        assert_eq!(sanitize_segment("Kamar  Depan (1).jpg"), "Kamar_Depan_1_.jpg");
        assert_eq!(sanitize_segment("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_segment("///"), "_");
        assert_eq!(sanitize_segment(&"a".repeat(300)).len(), 128);
    }

    #[test]
    fn key_uses_collection_name() {
        assert_eq!(
            object_key(Collection::CourseInstitutions, "abc 1", "0a1b2c3d", "logo.png"),
            "courseInstitutions/abc_1/0a1b2c3d-logo.png"
        );
    }

    #[test]
    fn upload_tags_are_short_hex_and_vary() {
        let first = upload_tag().unwrap();
        let second = upload_tag().unwrap();
        assert_eq!(first.len(), 8);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
