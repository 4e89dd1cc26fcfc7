use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Document, Searchable};
use crate::enums::Collection;

/// An English course institution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstitution {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    /// Programs offered, e.g. `"Speaking"`, `"TOEFL"`.
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    /// Public photo URLs.
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Price tier label, e.g. `"Murah"`, `"Sedang"`, `"Mahal"`.
    #[serde(default)]
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for CourseInstitution {
    const COLLECTION: Collection = Collection::CourseInstitutions;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for CourseInstitution {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn is_verified(&self) -> bool {
        self.is_verified
    }
}
