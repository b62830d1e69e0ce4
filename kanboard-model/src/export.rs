//! JSON export of a project.
//!
//! The export document is a direct field-for-field encoding of
//! [`Project`] and its tasks, pretty-printed with two-space indentation.

use crate::project::Project;

/// Error type for export encode/decode operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// The project could not be serialized.
    #[error("export encode error: {0}")]
    Encode(String),
    /// The document is not a valid project export.
    #[error("export decode error: {0}")]
    Decode(String),
}

/// Encodes a [`Project`] as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns `ExportError::Encode` if the project cannot be serialized.
pub fn encode(project: &Project) -> Result<String, ExportError> {
    serde_json::to_string_pretty(project).map_err(|e| ExportError::Encode(e.to_string()))
}

/// Decodes a [`Project`] from an export document.
///
/// # Errors
///
/// Returns `ExportError::Decode` if the document is not valid JSON or does
/// not describe a project.
pub fn decode(document: &str) -> Result<Project, ExportError> {
    serde_json::from_str(document).map_err(|e| ExportError::Decode(e.to_string()))
}

/// Returns the file name an exported project is saved under.
///
/// Path separators and control characters in the project name become `-`,
/// so the result is always a single path component.
#[must_use]
pub fn file_name(project: &Project) -> String {
    let stem: String = project
        .name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '-' } else { c })
        .collect();
    format!("{stem}.json")
}
