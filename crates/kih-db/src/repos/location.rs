//! Points of interest.

use kih_core::entities::Location;
use kih_core::enums::LocationCategory;

use crate::document::{DocumentStore, Query};
use crate::error::DatabaseError;
use crate::service::PortalService;

impl<S: DocumentStore> PortalService<S> {
    /// All locations, or only one category.
    pub async fn list_locations(
        &self,
        category: Option<LocationCategory>,
    ) -> Result<Vec<Location>, DatabaseError> {
        let query = match category {
            Some(category) => Query::new().where_eq("category", category.as_str()),
            None => Query::new(),
        };
        self.fetch_all(&query).await
    }

    pub async fn get_location(&self, id: &str) -> Result<Option<Location>, DatabaseError> {
        self.fetch(id).await
    }

    pub async fn create_location(&self, location: &Location) -> Result<String, DatabaseError> {
        self.insert(location).await
    }

    pub async fn delete_location(&self, id: &str) -> Result<(), DatabaseError> {
        self.remove::<Location>(id).await
    }
}
