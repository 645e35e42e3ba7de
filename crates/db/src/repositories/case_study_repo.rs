//! Repository for the `caseStudies` collection.

use crate::error::StoreError;
use crate::models::case_study::{CaseStudy, CreateCaseStudy, UpdateCaseStudy};
use crate::store::DocumentStore;

/// Provides CRUD operations for case studies.
pub struct CaseStudyRepo;

impl CaseStudyRepo {
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<CaseStudy>, StoreError> {
        super::list_all(store).await
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<CaseStudy>, StoreError> {
        super::find(store, id).await
    }

    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateCaseStudy,
    ) -> Result<CaseStudy, StoreError> {
        super::insert(store, dto).await
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        dto: &UpdateCaseStudy,
    ) -> Result<Option<CaseStudy>, StoreError> {
        super::update(store, id, dto).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        super::delete::<CaseStudy>(store, id).await
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store.count_where(crate::collections::CASE_STUDIES, None).await
    }
}
