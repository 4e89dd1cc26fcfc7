//! Categorical enums and the collection registry.
//!
//! Listing enums serialize in lowercase to match the stored documents.
//! Every enum exposes `as_str()` and `ALL` so filter panels can offer the
//! full option list even when no record uses a value yet.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

macro_rules! lowercase_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| CoreError::Validation(format!("unknown {}: {s}", $label)))
            }
        }
    };
}

lowercase_enum!(
    /// Kind of lodging listed in the kos/homestay collection.
    KosType, "lodging type" {
        Kos => "kos",
        Homestay => "homestay",
    }
);

lowercase_enum!(
    /// Who a kos accepts as tenants.
    GenderPreference, "gender preference" {
        Male => "male",
        Female => "female",
        Mixed => "mixed",
    }
);

lowercase_enum!(
    /// Category of a point of interest.
    LocationCategory, "location category" {
        Restaurant => "restaurant",
        Bank => "bank",
        Atm => "atm",
        Hospital => "hospital",
        Shopping => "shopping",
        Transport => "transport",
        Other => "other",
    }
);

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Named collections in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    CourseInstitutions,
    KosHomestay,
    ForumPosts,
    Replies,
    Locations,
}

impl Collection {
    pub const ALL: &'static [Self] = &[
        Self::CourseInstitutions,
        Self::KosHomestay,
        Self::ForumPosts,
        Self::Replies,
        Self::Locations,
    ];

    /// Collection name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CourseInstitutions => "courseInstitutions",
            Self::KosHomestay => "kosHomestay",
            Self::ForumPosts => "forumPosts",
            Self::Replies => "replies",
            Self::Locations => "locations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown collection: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("kos", KosType::Kos)]
    #[case("Homestay", KosType::Homestay)]
    #[case(" KOS ", KosType::Kos)]
    fn kos_type_parses_case_insensitively(#[case] raw: &str, #[case] expected: KosType) {
        assert_eq!(raw.parse::<KosType>().unwrap(), expected);
    }

    #[test]
    fn unknown_category_is_validation_error() {
        let err = "casino".parse::<LocationCategory>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn serde_matches_as_str() {
        for category in LocationCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::Value::String(category.as_str().into()));
        }
        let json = serde_json::to_value(Collection::KosHomestay).unwrap();
        assert_eq!(json, serde_json::json!("kosHomestay"));
    }

    #[test]
    fn collection_roundtrips_through_from_str() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), *collection);
        }
    }
}
