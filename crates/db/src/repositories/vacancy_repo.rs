//! Repository for the `vacancies` collection.

use crate::error::StoreError;
use crate::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};
use crate::store::DocumentStore;

/// Provides CRUD operations for vacancies.
pub struct VacancyRepo;

impl VacancyRepo {
    /// All vacancies, newest first.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Vacancy>, StoreError> {
        super::list_all(store).await
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Vacancy>, StoreError> {
        super::find(store, id).await
    }

    /// Insert a vacancy; the display date is fixed here.
    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateVacancy,
    ) -> Result<Vacancy, StoreError> {
        super::insert(store, dto).await
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        dto: &UpdateVacancy,
    ) -> Result<Option<Vacancy>, StoreError> {
        super::update(store, id, dto).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        super::delete::<Vacancy>(store, id).await
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store.count_where(crate::collections::VACANCIES, None).await
    }
}
