//! `DocumentStore` over the libSQL `documents` table.
//!
//! Query constraints become `json_extract` predicates; `createdAt` and
//! `updatedAt` map onto the timestamp columns.

use serde_json::{Map, Value};

use crate::KihDb;
use crate::document::{Constraint, DocumentStore, FieldOp, Query, StoredDocument};
use crate::error::DatabaseError;
use crate::helpers::{is_valid_field_path, parse_datetime, strip_reserved};

const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

fn row_to_document(collection: &str, row: &libsql::Row) -> Result<StoredDocument, DatabaseError> {
    let id = row.get::<String>(0)?;
    let data: Map<String, Value> = serde_json::from_str(&row.get::<String>(1)?)
        .map_err(|e| DatabaseError::InvalidState(format!("{collection}/{id}: {e}")))?;
    Ok(StoredDocument {
        collection: collection.to_string(),
        id,
        data,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

/// SQL expression addressing `field`.
fn field_expr(field: &str) -> Result<String, DatabaseError> {
    match field {
        "createdAt" => Ok("created_at".into()),
        "updatedAt" => Ok("updated_at".into()),
        "id" => Ok("id".into()),
        _ if is_valid_field_path(field) => Ok(format!("json_extract(data, '$.{field}')")),
        _ => Err(DatabaseError::InvalidQuery(format!(
            "field name not allowed: {field:?}"
        ))),
    }
}

/// Scalar JSON value to a bindable SQL value, matching what `json_extract`
/// returns (booleans come back as 0/1).
fn to_sql_value(value: &Value) -> Result<libsql::Value, DatabaseError> {
    match value {
        Value::Null => Ok(libsql::Value::Null),
        Value::Bool(b) => Ok(libsql::Value::Integer(i64::from(*b))),
        Value::Number(n) => n.as_i64().map_or_else(
            || {
                n.as_f64().map(libsql::Value::Real).ok_or_else(|| {
                    DatabaseError::InvalidQuery(format!("number out of range: {n}"))
                })
            },
            |i| Ok(libsql::Value::Integer(i)),
        ),
        Value::String(s) => Ok(libsql::Value::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(DatabaseError::InvalidQuery(
            "only scalar values can be compared".into(),
        )),
    }
}

/// Translate a [`Query`] into SQL plus positional parameters.
pub(crate) fn build_select(
    collection: &str,
    query: &Query,
) -> Result<(String, Vec<libsql::Value>), DatabaseError> {
    let mut sql = String::from(
        "SELECT id, data, created_at, updated_at FROM documents WHERE collection = ?1",
    );
    let mut params = vec![libsql::Value::Text(collection.to_string())];
    let mut order = Vec::new();
    let mut limit = None;

    for constraint in query.constraints() {
        match constraint {
            Constraint::Where { field, op, value } => match op {
                FieldOp::Eq if value.is_null() => {
                    sql.push_str(&format!(" AND {} IS NULL", field_expr(field)?));
                }
                FieldOp::Eq => {
                    params.push(to_sql_value(value)?);
                    sql.push_str(&format!(" AND {} = ?{}", field_expr(field)?, params.len()));
                }
                FieldOp::ArrayContains => {
                    if !is_valid_field_path(field) {
                        return Err(DatabaseError::InvalidQuery(format!(
                            "field name not allowed: {field:?}"
                        )));
                    }
                    params.push(to_sql_value(value)?);
                    sql.push_str(&format!(
                        " AND EXISTS (SELECT 1 FROM json_each(data, '$.{field}') WHERE json_each.value = ?{})",
                        params.len()
                    ));
                }
            },
            Constraint::OrderBy { field, direction } => {
                order.push(format!("{} {}", field_expr(field)?, direction.as_sql()));
            }
            Constraint::Limit(n) => limit = Some(*n),
        }
    }

    order.push("rowid ASC".into());
    sql.push_str(" ORDER BY ");
    sql.push_str(&order.join(", "));
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }
    Ok((sql, params))
}

impl KihDb {
    async fn fetch_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, data, created_at, updated_at FROM documents
                 WHERE collection = ?1 AND id = ?2",
                [collection, id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_document(collection, &row)?)),
            None => Ok(None),
        }
    }

    async fn fetch_by_query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, DatabaseError> {
        let (sql, params) = build_select(collection, query)?;
        let mut rows = self
            .conn
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut docs = Vec::new();
        while let Some(row) = rows.next().await? {
            docs.push(row_to_document(collection, &row)?);
        }
        Ok(docs)
    }

    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, DatabaseError> {
        let id = self.generate_id().await?;
        let body = serde_json::to_string(&Value::Object(strip_reserved(data)))?;
        self.conn
            .execute(
                "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, json(?3))",
                libsql::params![collection, id.as_str(), body],
            )
            .await?;
        Ok(id)
    }

    async fn patch(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), DatabaseError> {
        let body = serde_json::to_string(&Value::Object(strip_reserved(patch)))?;
        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE documents SET data = json_patch(data, json(?3)), updated_at = {NOW}
                     WHERE collection = ?1 AND id = ?2"
                ),
                libsql::params![collection, id, body],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
            )
            .await?;
        if removed == 0 {
            tracing::debug!(%collection, %id, "delete of absent document");
        }
        Ok(())
    }
}

impl DocumentStore for KihDb {
    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        self.fetch_by_id(collection, id).await.inspect_err(|e| {
            tracing::error!(%collection, %id, error = %e, "fetch by id failed");
        })
    }

    async fn get_by_query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, DatabaseError> {
        self.fetch_by_query(collection, query)
            .await
            .inspect_err(|e| {
                tracing::error!(%collection, error = %e, "fetch by query failed");
            })
    }

    async fn add(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, DatabaseError> {
        self.insert(collection, data).await.inspect_err(|e| {
            tracing::error!(%collection, error = %e, "failed to add document");
        })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), DatabaseError> {
        self.patch(collection, id, patch).await.inspect_err(|e| {
            tracing::error!(%collection, %id, error = %e, "failed to update document");
        })
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        self.delete(collection, id).await.inspect_err(|e| {
            tracing::error!(%collection, %id, error = %e, "failed to delete document");
        })
    }
}
