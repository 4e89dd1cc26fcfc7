//! Course institution repository.

use kih_core::entities::CourseInstitution;

use crate::document::{DocumentStore, Query};
use crate::error::DatabaseError;
use crate::helpers::to_body;
use crate::repos::{string_array, with_photo};
use crate::service::{PortalService, field_patch};
use crate::updates::course::CourseUpdate;

impl<S: DocumentStore> PortalService<S> {
    /// All courses in store order.
    pub async fn list_courses(&self) -> Result<Vec<CourseInstitution>, DatabaseError> {
        self.fetch_all(&Query::new()).await
    }

    pub async fn get_course(&self, id: &str) -> Result<Option<CourseInstitution>, DatabaseError> {
        self.fetch(id).await
    }

    pub async fn create_course(&self, course: &CourseInstitution) -> Result<String, DatabaseError> {
        self.insert(course).await
    }

    pub async fn update_course(
        &self,
        id: &str,
        update: &CourseUpdate,
    ) -> Result<(), DatabaseError> {
        self.patch::<CourseInstitution>(id, to_body(update)?).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), DatabaseError> {
        self.remove::<CourseInstitution>(id).await
    }

    /// Record an uploaded photo URL on the course. Returns the new photo list.
    pub async fn add_course_photo(
        &self,
        id: &str,
        url: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let course: CourseInstitution = self.fetch_required(id).await?;
        let photos = with_photo(course.photos, url);
        self.patch::<CourseInstitution>(id, field_patch("photos", string_array(&photos)))
            .await?;
        Ok(photos)
    }
}
