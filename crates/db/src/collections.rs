//! Collection names in the document store.

pub const VACANCIES: &str = "vacancies";
pub const CASE_STUDIES: &str = "caseStudies";
pub const APPLICATIONS: &str = "applications";
pub const CONTACTS: &str = "contacts";
pub const ADMIN_USERS: &str = "adminUsers";
pub const SESSIONS: &str = "sessions";
