//! Service layer exposing typed repositories over a document store.
//!
//! `PortalService` owns a [`DocumentStore`]. Every repository method lives in
//! `repos/*.rs` as an `impl<S: DocumentStore> PortalService<S>` block.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use kih_core::entities::Document;

use crate::KihDb;
use crate::document::{DocumentStore, Query};
use crate::error::DatabaseError;
use crate::helpers::to_body;

pub struct PortalService<S = KihDb> {
    store: S,
}

impl PortalService<KihDb> {
    /// Service over a local database file (`:memory:` for tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::new(KihDb::open_local(path).await?))
    }

    /// Service over a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        Ok(Self::new(KihDb::open_remote(url, auth_token).await?))
    }
}

impl<S: DocumentStore> PortalService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one entity by id; absent ids are `Ok(None)`.
    pub(crate) async fn fetch<T>(&self, id: &str) -> Result<Option<T>, DatabaseError>
    where
        T: Document + DeserializeOwned,
    {
        match self.store.get_by_id(T::COLLECTION.as_str(), id).await? {
            Some(doc) => Ok(Some(doc.into_entity()?)),
            None => Ok(None),
        }
    }

    /// Fetch one entity, treating absence as [`DatabaseError::NotFound`].
    pub(crate) async fn fetch_required<T>(&self, id: &str) -> Result<T, DatabaseError>
    where
        T: Document + DeserializeOwned,
    {
        self.fetch(id).await?.ok_or_else(|| DatabaseError::NotFound {
            collection: T::COLLECTION.as_str().to_string(),
            id: id.to_string(),
        })
    }

    pub(crate) async fn fetch_all<T>(&self, query: &Query) -> Result<Vec<T>, DatabaseError>
    where
        T: Document + DeserializeOwned,
    {
        self.store
            .get_by_query(T::COLLECTION.as_str(), query)
            .await?
            .into_iter()
            .map(crate::document::StoredDocument::into_entity)
            .collect()
    }

    pub(crate) async fn insert<T>(&self, entity: &T) -> Result<String, DatabaseError>
    where
        T: Document + Serialize,
    {
        self.store
            .add(T::COLLECTION.as_str(), to_body(entity)?)
            .await
    }

    pub(crate) async fn patch<T: Document>(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), DatabaseError> {
        self.store.update(T::COLLECTION.as_str(), id, patch).await
    }

    pub(crate) async fn remove<T: Document>(&self, id: &str) -> Result<(), DatabaseError> {
        self.store.remove(T::COLLECTION.as_str(), id).await
    }
}

/// Single-field patch body.
pub(crate) fn field_patch(field: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(field.to_string(), value.into());
    patch
}
