//! Case studies shown on the Case Studies page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siliconedge_core::dates::display_date;
use siliconedge_core::mirror::Identified;
use siliconedge_core::search::Searchable;
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::CASE_STUDIES;

/// A document from the `caseStudies` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: DocId,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub date: String,
}

/// DTO for creating a case study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseStudy {
    pub title: String,
    pub category: String,
    pub description: String,
    pub pdf_url: Option<String>,
}

/// DTO for partially updating a case study.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCaseStudy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` removes the stored URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<Option<String>>,
}

impl Entity for CaseStudy {
    const COLLECTION: &'static str = CASE_STUDIES;
    const NAME: &'static str = "CaseStudy";

    fn on_insert(data: &mut Map<String, Value>, now: &Timestamp) {
        data.insert("date".into(), Value::String(display_date(now)));
    }
}

impl Identified for CaseStudy {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

impl Searchable for CaseStudy {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.category.as_str()]
    }
}
