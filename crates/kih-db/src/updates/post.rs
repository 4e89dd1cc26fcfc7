//! Forum post update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_photo_url: Option<Option<String>>,
}

pub struct PostUpdateBuilder(PostUpdate);

impl PostUpdateBuilder {
    pub fn new() -> Self {
        Self(PostUpdate::default())
    }

    pub fn content(mut self, val: impl Into<String>) -> Self {
        self.0.content = Some(val.into());
        self
    }

    pub fn author_photo_url(mut self, val: Option<String>) -> Self {
        self.0.author_photo_url = Some(val);
        self
    }

    pub fn build(self) -> PostUpdate {
        self.0
    }
}
