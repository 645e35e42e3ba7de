//! Messages submitted through the Contact form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siliconedge_core::mirror::Identified;
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::CONTACTS;

/// A document from the `contacts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: DocId,
    pub name: String,
    pub subject: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub processed: bool,
}

/// DTO for a contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub subject: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

/// DTO for admin updates to a contact message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<bool>,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = CONTACTS;
    const NAME: &'static str = "ContactMessage";

    fn on_insert(data: &mut Map<String, Value>, _now: &Timestamp) {
        data.insert("processed".into(), Value::Bool(false));
    }
}

impl Identified for ContactMessage {
    fn doc_id(&self) -> &str {
        &self.id
    }
}
