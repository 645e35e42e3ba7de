//! Postgres-backed document store (one JSONB `documents` table).

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{expect_object, new_doc_id, Document, DocumentStore};
use crate::error::StoreError;

/// Column list for `documents` queries.
const COLUMNS: &str = "collection, id, data, created_at";

/// [`DocumentStore`] over the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE collection = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let docs = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        let data = Value::Object(expect_object(data)?);
        let query = format!(
            "INSERT INTO documents (collection, id, data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(new_doc_id())
            .bind(&data)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Document>, StoreError> {
        let patch = Value::Object(expect_object(patch)?);
        // `||` on two JSONB objects is a shallow merge, right side wins.
        let query = format!(
            "UPDATE documents SET \
                 data = data || $3, \
                 updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(id)
            .bind(&patch)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError> {
        // Read and write happen in one statement under the row lock.
        let next = sqlx::query_scalar::<_, i64>(
            "UPDATE documents SET \
                 data = jsonb_set( \
                     data, ARRAY[$3::text], \
                     to_jsonb(COALESCE((data ->> $3::text)::bigint, 0) + 1)), \
                 updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING (data ->> $3::text)::bigint",
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .fetch_optional(&self.pool)
        .await?;
        Ok(next)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE collection = $1 AND data -> $2 = $3 \
             ORDER BY created_at DESC, id DESC"
        );
        let docs = sqlx::query_as::<_, Document>(&query)
            .bind(collection)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn count_where(
        &self,
        collection: &str,
        filter: Option<(&str, &Value)>,
    ) -> Result<i64, StoreError> {
        let count = match filter {
            Some((field, value)) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM documents \
                     WHERE collection = $1 AND data -> $2 = $3",
                )
                .bind(collection)
                .bind(field)
                .bind(value)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE collection = $1")
                    .bind(collection)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
