//! Document-store access for the SiliconEdge site backend.
//!
//! - [`store`] -- the collection/id document contract plus its Postgres and
//!   in-memory implementations.
//! - [`models`] -- typed records and request DTOs per collection.
//! - [`repositories`] -- typed CRUD over a [`store::DocumentStore`].
//! - [`mirror`] -- an in-memory copy of a collection kept in step with the
//!   store after each successful call.

use sqlx::postgres::PgPoolOptions;

pub mod collections;
pub mod error;
pub mod mirror;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::{Document, DocumentStore, MemoryDocumentStore, PgDocumentStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
