//! Refresh-token sessions for admin logins.

use serde::{Deserialize, Serialize};
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::SESSIONS;

/// A document from the `sessions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: DocId,
    pub user_id: DocId,
    /// SHA-256 hex digest of the refresh token; the plaintext is never stored.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a session.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSession {
    pub user_id: DocId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}

impl Entity for Session {
    const COLLECTION: &'static str = SESSIONS;
    const NAME: &'static str = "Session";
}
