use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Author name used when the signed-in user has no display name.
pub const ANONYMOUS_AUTHOR: &str = "Anonim";

/// Read-only copy of the signed-in user.
///
/// Produced by `kih-auth`'s session hub, consumed by pages and flows.
/// Contains only data fields, never provider handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    /// Provider user id (the `localId` / `user_id` claim).
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl UserSnapshot {
    /// Name shown on posts and replies.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> UserSnapshot {
        UserSnapshot {
            uid: "u1".into(),
            email: Some("siti@example.com".into()),
            display_name: display_name.map(Into::into),
            photo_url: None,
        }
    }

    #[test]
    fn author_name_falls_back_to_anonim() {
        assert_eq!(user(None).author_name(), "Anonim");
        assert_eq!(user(Some("   ")).author_name(), "Anonim");
        assert_eq!(user(Some("Siti")).author_name(), "Siti");
    }
}
