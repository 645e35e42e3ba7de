//! Upload folders, object key naming and file-type rules.
//!
//! Objects live under a folder per purpose and are named
//! `<folder>/<unix_millis>_<sanitised filename>` so repeated uploads of the
//! same file never overwrite each other.

use chrono::Utc;

use crate::error::CoreError;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Purpose-specific upload folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Resumes,
    CaseStudies,
}

impl UploadFolder {
    /// Parse from the folder name used in object keys and upload forms.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "resumes" => Ok(Self::Resumes),
            "caseStudies" => Ok(Self::CaseStudies),
            other => Err(CoreError::Validation(format!(
                "Unknown upload folder '{other}'. Must be one of: resumes, caseStudies"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Resumes => "resumes",
            Self::CaseStudies => "caseStudies",
        }
    }

    /// File extensions accepted for this folder (lowercase, no dot).
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Resumes => &["pdf", "doc", "docx"],
            Self::CaseStudies => &["pdf"],
        }
    }
}

/// Lowercased extension of `filename`, if any.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Content type for an accepted extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Reduce `filename` to a safe object-key segment.
///
/// Path components are dropped, whitespace becomes `_`, and anything outside
/// `[A-Za-z0-9._-]` is removed.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// A checked upload ready to be handed to object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub key: String,
    pub content_type: &'static str,
}

/// Validate an upload against the folder rules and build its object key.
pub fn plan_upload(
    folder: UploadFolder,
    filename: &str,
    size: usize,
) -> Result<UploadPlan, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "Uploaded file exceeds the {} MiB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let ext = extension(filename).unwrap_or_default();
    let allowed = folder.allowed_extensions();
    if !allowed.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Allowed: {}",
            allowed.join(", ")
        )));
    }

    let key = format!(
        "{}/{}_{}",
        folder.name(),
        Utc::now().timestamp_millis(),
        sanitize_filename(filename)
    );
    Ok(UploadPlan {
        key,
        content_type: content_type_for(&ext),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn folder_names_round_trip() {
        for folder in [UploadFolder::Resumes, UploadFolder::CaseStudies] {
            assert_eq!(UploadFolder::from_name(folder.name()).unwrap(), folder);
        }
        assert!(UploadFolder::from_name("avatars").is_err());
    }

    #[test]
    fn sanitize_strips_paths_and_symbols() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\My CV (final).pdf"), "My_CV_final.pdf");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("Resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".pdf"), None);
    }

    #[test]
    fn plan_builds_key_in_folder() {
        let plan = plan_upload(UploadFolder::Resumes, "jane cv.docx", 1024).unwrap();
        assert!(plan.key.starts_with("resumes/"));
        assert!(plan.key.ends_with("_jane_cv.docx"));
        assert_eq!(
            plan.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[test]
    fn case_studies_only_accept_pdf() {
        let result = plan_upload(UploadFolder::CaseStudies, "deck.docx", 10);
        assert_matches!(result, Err(CoreError::Validation(m)) if m.contains(".docx"));
    }

    #[test]
    fn size_limits() {
        assert!(plan_upload(UploadFolder::Resumes, "a.pdf", 0).is_err());
        assert!(plan_upload(UploadFolder::Resumes, "a.pdf", MAX_UPLOAD_BYTES).is_ok());
        assert!(plan_upload(UploadFolder::Resumes, "a.pdf", MAX_UPLOAD_BYTES + 1).is_err());
    }
}
