//! Shared test utilities for kih-db unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::{Map, Value};
use tokio::sync::Notify;

use crate::KihDb;
use crate::document::{DocumentStore, Query, StoredDocument};
use crate::error::DatabaseError;
use crate::service::PortalService;

/// In-memory service over a fresh database.
pub async fn test_service() -> PortalService<KihDb> {
    PortalService::new_local(":memory:").await.unwrap()
}

/// Store wrapper that counts writes, can hold adds at a gate, and can be
/// told to fail writes.
pub struct CountingStore {
    inner: KihDb,
    pub adds: AtomicUsize,
    pub updates: AtomicUsize,
    pub removes: AtomicUsize,
    gate: Option<Arc<Notify>>,
    fail_writes: AtomicBool,
}

impl CountingStore {
    pub async fn new() -> Self {
        Self {
            inner: KihDb::open_local(":memory:").await.unwrap(),
            adds: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            gate: None,
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Adds wait for one `notify_one` on `gate` before reaching the database.
    pub async fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new().await
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DatabaseError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(DatabaseError::Query("store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for CountingStore {
    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        self.inner.get_by_id(collection, id).await
    }

    async fn get_by_query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, DatabaseError> {
        self.inner.get_by_query(collection, query).await
    }

    async fn add(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, DatabaseError> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.check_failure()?;
        self.inner.add(collection, data).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), DatabaseError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.update(collection, id, patch).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.remove(collection, id).await
    }
}
