/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The Postgres backend failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be converted to or from its typed record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload is not a JSON object, or a stored document is malformed.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The backend refused or could not serve the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
