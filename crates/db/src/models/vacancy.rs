//! Job vacancies shown on the Careers page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siliconedge_core::dates::display_date;
use siliconedge_core::mirror::Identified;
use siliconedge_core::search::Searchable;
use siliconedge_core::types::{DocId, Timestamp};

use super::Entity;
use crate::collections::VACANCIES;

/// A document from the `vacancies` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: DocId,
    pub title: String,
    /// Experience range, e.g. `"3-5 years"`.
    pub experience: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    pub created_at: Timestamp,
    /// Display date fixed at creation.
    #[serde(default)]
    pub date: String,
}

/// DTO for creating a vacancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVacancy {
    pub title: String,
    pub experience: String,
    pub location: String,
    pub description: String,
    pub pdf_url: Option<String>,
}

/// DTO for partially updating a vacancy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVacancy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` removes the stored URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<Option<String>>,
}

impl Entity for Vacancy {
    const COLLECTION: &'static str = VACANCIES;
    const NAME: &'static str = "Vacancy";

    fn on_insert(data: &mut Map<String, Value>, now: &Timestamp) {
        data.insert("date".into(), Value::String(display_date(now)));
    }
}

impl Identified for Vacancy {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Vacancy {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.location.as_str(),
            self.experience.as_str(),
        ]
    }
}
