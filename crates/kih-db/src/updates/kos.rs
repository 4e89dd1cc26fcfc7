//! Kos/homestay update builder.

use serde::Serialize;
use kih_core::enums::{GenderPreference, KosType};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KosUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_center: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<KosType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_preference: Option<Option<GenderPreference>>,
}

pub struct KosUpdateBuilder(KosUpdate);

impl KosUpdateBuilder {
    pub fn new() -> Self {
        Self(KosUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub fn address(mut self, val: impl Into<String>) -> Self {
        self.0.address = Some(val.into());
        self
    }

    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    pub fn owner_contact(mut self, val: impl Into<String>) -> Self {
        self.0.owner_contact = Some(val.into());
        self
    }

    pub fn price_per_month(mut self, val: f64) -> Self {
        self.0.price_per_month = Some(val);
        self
    }

    pub fn facilities(mut self, val: Vec<String>) -> Self {
        self.0.facilities = Some(val);
        self
    }

    pub fn verified(mut self, val: bool) -> Self {
        self.0.is_verified = Some(val);
        self
    }

    pub fn distance_to_center(mut self, val: f64) -> Self {
        self.0.distance_to_center = Some(val);
        self
    }

    pub fn kind(mut self, val: KosType) -> Self {
        self.0.kind = Some(val);
        self
    }

    pub fn gender_preference(mut self, val: Option<GenderPreference>) -> Self {
        self.0.gender_preference = Some(val);
        self
    }

    pub fn build(self) -> KosUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_only_set_fields() {
        let update = KosUpdateBuilder::new()
            .price_per_month(550_000.0)
            .kind(KosType::Homestay)
            .gender_preference(None)
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "pricePerMonth": 550_000.0,
                "type": "homestay",
                "genderPreference": null
            })
        );
    }
}
