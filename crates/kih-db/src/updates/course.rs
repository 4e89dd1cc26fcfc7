//! Course institution update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

pub struct CourseUpdateBuilder(CourseUpdate);

impl CourseUpdateBuilder {
    pub fn new() -> Self {
        Self(CourseUpdate::default())
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

    pub fn contact(mut self, val: impl Into<String>) -> Self {
        self.0.contact = Some(val.into());
        self
    }

    pub fn programs(mut self, val: Vec<String>) -> Self {
        self.0.programs = Some(val);
        self
    }

    pub fn price_range(mut self, val: impl Into<String>) -> Self {
        self.0.price_range = Some(val.into());
        self
    }

    pub fn verified(mut self, val: bool) -> Self {
        self.0.is_verified = Some(val);
        self
    }

    pub fn build(self) -> CourseUpdate {
        self.0
    }
}
