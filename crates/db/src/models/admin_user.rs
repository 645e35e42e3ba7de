//! Admin accounts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::ADMIN_USERS;

/// A document from the `adminUsers` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: DocId,
    /// Stored lowercased.
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    #[serde(default)]
    pub failed_login_count: i32,
    #[serde(default)]
    pub locked_until: Option<Timestamp>,
    #[serde(default)]
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating an admin account.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAdminUser {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for profile edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAdminProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Entity for AdminUser {
    const COLLECTION: &'static str = ADMIN_USERS;
    const NAME: &'static str = "AdminUser";

    fn on_insert(data: &mut Map<String, Value>, _now: &Timestamp) {
        data.insert("failed_login_count".into(), Value::from(0));
    }
}
