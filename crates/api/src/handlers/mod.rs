pub mod applications;
pub mod auth;
pub mod case_studies;
pub mod dashboard;
pub mod inquiries;
pub mod layout;
pub mod multipart;
pub mod site;
pub mod uploads;
pub mod vacancies;

/// Trim an optional text field, keeping `None` as is.
pub(crate) fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// A PDF URL edit: absent leaves it alone, blank clears it.
pub(crate) fn pdf_url_patch(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|url| url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()))
}
