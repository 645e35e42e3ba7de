//! Field validation for form submissions and admin edits.
//!
//! Every check returns [`CoreError::Validation`] with a message naming the
//! offending field, so handlers can pass the error straight through.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum admin password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Upper bound on free-text fields (messages, descriptions).
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Upper bound on single-line fields (names, titles, subjects).
pub const MAX_LINE_LENGTH: usize = 200;

/// Require `value` to contain something other than whitespace.
pub fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Require a non-blank single-line value within [`MAX_LINE_LENGTH`].
pub fn require_line(field: &str, value: &str) -> Result<(), CoreError> {
    require(field, value)?;
    max_len(field, value, MAX_LINE_LENGTH)
}

/// Require a non-blank free-text value within [`MAX_TEXT_LENGTH`].
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    require(field, value)?;
    max_len(field, value, MAX_TEXT_LENGTH)
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Require a syntactically valid email address.
pub fn email(value: &str) -> Result<(), CoreError> {
    require("Email", value)?;
    if !value.trim().to_string().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            value.trim()
        )));
    }
    Ok(())
}

/// An optional phone number: empty, or digits with common separators.
pub fn phone(value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
    if !allowed || !(6..=20).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "'{value}' is not a valid phone number"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Form-level checks
// ---------------------------------------------------------------------------

/// Contact form: name, subject, email and message are required.
pub fn contact(
    name: &str,
    subject: &str,
    email_addr: &str,
    phone_number: &str,
    message: &str,
) -> Result<(), CoreError> {
    require_line("Name", name)?;
    require_line("Subject", subject)?;
    email(email_addr)?;
    phone(phone_number)?;
    require_text("Message", message)
}

/// Job application: name, email and job title are required.
pub fn application(
    name: &str,
    email_addr: &str,
    phone_number: &str,
    job_title: &str,
    message: &str,
) -> Result<(), CoreError> {
    require_line("Name", name)?;
    email(email_addr)?;
    phone(phone_number)?;
    require_line("Job title", job_title)?;
    max_len("Message", message, MAX_TEXT_LENGTH)
}

/// Vacancy: every descriptive field is required.
pub fn vacancy(
    title: &str,
    experience: &str,
    location: &str,
    description: &str,
) -> Result<(), CoreError> {
    require_line("Title", title)?;
    require_line("Experience", experience)?;
    require_line("Location", location)?;
    require_text("Description", description)
}

/// Case study: title, category and description are required.
pub fn case_study(title: &str, category: &str, description: &str) -> Result<(), CoreError> {
    require_line("Title", title)?;
    require_line("Category", category)?;
    require_text("Description", description)
}

/// Admin profile: display name and email.
pub fn profile(display_name: &str, email_addr: &str) -> Result<(), CoreError> {
    require_line("Display name", display_name)?;
    email(email_addr)
}

/// Password strength (minimum length only).
pub fn password(value: &str) -> Result<(), CoreError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
