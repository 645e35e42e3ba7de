//! Object storage for uploaded files (résumés, case-study PDFs).
//!
//! [`ObjectStorage`] is the seam the API writes through. Two backends:
//! - [`LocalObjectStorage`] -- files under a directory, served by the API
//!   itself at a public base path (development and tests).
//! - [`S3ObjectStorage`] -- an S3 bucket (or any S3-compatible endpoint).

use async_trait::async_trait;

mod local;
mod s3;

pub use local::LocalObjectStorage;
pub use s3::{S3ObjectStorage, S3Settings};

/// Errors raised by an [`ObjectStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key is empty or escapes the storage root.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote object store rejected or failed the call.
    #[error("Object store error: {0}")]
    Backend(String),
}

/// Put and remove objects by key.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return the object's public URL.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove the object under `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Reject keys that are empty, absolute, or contain `.`/`..` segments.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let bad_segment = key
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\'));
    if key.is_empty() || bad_segment {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Join a public base URL and a key with exactly one slash.
pub(crate) fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
