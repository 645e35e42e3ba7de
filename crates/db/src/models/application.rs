//! Job applications submitted from the Careers page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siliconedge_core::mirror::Identified;
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::APPLICATIONS;

/// A document from the `applications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: DocId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    pub job_title: String,
    pub resume_url: String,
    /// Server-set submission time (the document creation timestamp).
    #[serde(alias = "created_at")]
    pub applied_at: Timestamp,
    #[serde(default)]
    pub processed: bool,
}

/// DTO for storing a new application once the résumé is uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub job_title: String,
    pub resume_url: String,
}

/// DTO for admin updates to an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<bool>,
}

impl Entity for Application {
    const COLLECTION: &'static str = APPLICATIONS;
    const NAME: &'static str = "Application";

    fn on_insert(data: &mut Map<String, Value>, _now: &Timestamp) {
        data.insert("processed".into(), Value::Bool(false));
    }
}

impl Identified for Application {
    fn doc_id(&self) -> &str {
        &self.id
    }
}
