//! Error types for `sprintboard-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for sprintboard-lib operations.
#[derive(Error, Debug)]
pub enum BoardError {
    // === Lookup Errors ===
    /// Issue with the specified ID (or key) was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// User with the specified ID or name was not found.
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// Sprint with the specified ID was not found.
    #[error("Sprint not found: {id}")]
    SprintNotFound { id: String },

    /// Project with the specified ID was not found.
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// Creating an issue requires a current project to derive its key.
    #[error("No current project selected")]
    NoCurrentProject,

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid issue type value.
    #[error("Invalid issue type: {issue_type}")]
    InvalidType { issue_type: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    /// Invalid sprint status value.
    #[error("Invalid sprint status: {status}")]
    InvalidSprintStatus { status: String },

    /// Unknown filter category name.
    #[error("Invalid filter category: {category}")]
    InvalidFilterCategory { category: String },

    /// Unsupported report window.
    #[error("Invalid report window '{window}': expected 7, 14, 30, 90 or all")]
    InvalidWindow { window: String },

    /// Timestamp string that is not ISO-8601.
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    // === Hydration Errors ===
    /// The tickets document could not be parsed.
    #[error("Tickets document parse error: {reason}")]
    HydrationParse { reason: String },

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Concurrency ===
    /// A thread panicked while holding the shared store lock.
    #[error("Shared store lock poisoned")]
    Poisoned,
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl BoardError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn issue_not_found(id: impl Into<String>) -> Self {
        Self::IssueNotFound { id: id.into() }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for the lookup failures commands report instead of mutating.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IssueNotFound { .. }
                | Self::UserNotFound { .. }
                | Self::SprintNotFound { .. }
                | Self::ProjectNotFound { .. }
        )
    }
}

/// Result type using `BoardError`.
pub type Result<T> = std::result::Result<T, BoardError>;
