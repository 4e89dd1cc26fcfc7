use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Document, Searchable};
use crate::enums::{Collection, GenderPreference, KosType};

/// A kos (monthly boarding room) or homestay listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KosHomestay {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner_contact: String,
    /// Monthly price in rupiah.
    #[serde(default)]
    pub price_per_month: f64,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Kilometres to the village centre.
    #[serde(default)]
    pub distance_to_center: f64,
    #[serde(rename = "type")]
    pub kind: KosType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_preference: Option<GenderPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for KosHomestay {
    const COLLECTION: Collection = Collection::KosHomestay;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for KosHomestay {
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
