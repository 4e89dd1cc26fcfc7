//! The document store contract.
//!
//! Records are schema-flexible JSON objects grouped in named collections and
//! keyed by a store-generated id. Every operation is a single awaited call:
//! no retries, no transactions, last write wins.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DatabaseError;

/// A record as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: String,
    pub id: String,
    /// Body without store-owned keys.
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// The body with `id`, `createdAt`, and `updatedAt` merged back in.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut data = self.data;
        data.insert("id".into(), Value::String(self.id));
        data.insert("createdAt".into(), Value::String(self.created_at.to_rfc3339()));
        data.insert("updatedAt".into(), Value::String(self.updated_at.to_rfc3339()));
        Value::Object(data)
    }

    /// Deserialize into an entity.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when the stored body does not fit `T`.
    pub fn into_entity<T: DeserializeOwned>(self) -> Result<T, DatabaseError> {
        let location = format!("{}/{}", self.collection, self.id);
        serde_json::from_value(self.into_value())
            .map_err(|e| DatabaseError::InvalidState(format!("{location}: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Query constraints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Field equals the value.
    Eq,
    /// Array field contains the value.
    ArrayContains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Where {
        field: String,
        op: FieldOp,
        value: Value,
    },
    OrderBy {
        field: String,
        direction: Direction,
    },
    Limit(u32),
}

/// An ordered list of constraints. Without an `OrderBy`, results come back
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: Vec<Constraint>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Where {
            field: field.into(),
            op: FieldOp::Eq,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn array_contains(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Where {
            field: field.into(),
            op: FieldOp::ArrayContains,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.constraints.push(Constraint::OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.constraints.push(Constraint::Limit(n));
        self
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Data-access contract over a collection/document store.
///
/// Implementations log provider failures before returning them.
pub trait DocumentStore: Send + Sync {
    /// Fetch one record. An unknown id is `Ok(None)`.
    fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<StoredDocument>, DatabaseError>> + Send;

    /// Fetch every record matching `query`.
    fn get_by_query(
        &self,
        collection: &str,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<StoredDocument>, DatabaseError>> + Send;

    /// Insert a record and return its generated id. Creation and update
    /// times are stamped by the store.
    fn add(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> impl Future<Output = Result<String, DatabaseError>> + Send;

    /// Merge `patch` into an existing record and restamp its update time.
    /// `null` values remove fields.
    fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;

    /// Delete a record. Deleting an unknown id succeeds.
    fn remove(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;
}
