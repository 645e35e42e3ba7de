//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?q=` for list endpoints with a text filter.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `?confirm=true`, required by every DELETE.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmParams {
    /// Reject the request unless the caller confirmed the deletion.
    pub fn require(&self, what: &str) -> Result<(), crate::error::AppError> {
        if !self.confirm {
            return Err(crate::error::AppError::BadRequest(format!(
                "Deleting {what} requires confirmation (?confirm=true)"
            )));
        }
        Ok(())
    }
}

/// `?processed=` filter for the inbox lists.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessedFilter {
    pub processed: Option<bool>,
}

/// `?path=` for route resolution.
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}
