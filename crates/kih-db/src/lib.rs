//! # kih-db
//!
//! Document store access for the portal.
//!
//! A single libSQL table holds every collection as JSON documents. The
//! [`DocumentStore`](document::DocumentStore) trait is the data-access
//! contract; [`KihDb`] implements it against a local file, `:memory:`, or a
//! remote libSQL database. [`PortalService`](service::PortalService) layers
//! typed repositories on top, and [`flows`] holds the forum submit/delete
//! state machines.

pub mod document;
pub mod error;
pub mod flows;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod store;
#[cfg(test)]
mod test_support;
pub mod updates;

pub use document::{Direction, DocumentStore, Query, StoredDocument};
pub use error::DatabaseError;
pub use service::PortalService;

use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection and generates document ids.
pub struct KihDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl KihDb {
    /// Open a local database at `path` (`:memory:` for tests).
    ///
    /// Runs migrations automatically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let kih_db = Self {
            db,
            conn,
            remote: false,
        };
        kih_db.run_migrations().await?;
        Ok(kih_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        let kih_db = Self {
            db,
            conn,
            remote: true,
        };
        kih_db.run_migrations().await?;
        Ok(kih_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a document id: 20 lowercase hex characters.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(10)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> KihDb {
        KihDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_documents_table() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["documents"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
        assert!(!db.is_remote());
    }

    #[tokio::test]
    async fn generate_id_is_twenty_hex_chars() {
        let db = test_db().await;
        let id = db.generate_id().await.unwrap();
        assert_eq!(id.len(), 20, "unexpected id: {id}");
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id().await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn opens_file_database_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");
        let db = KihDb::open_local(path.to_str().unwrap()).await.unwrap();
        db.generate_id().await.unwrap();
        assert!(path.exists());
    }
}
