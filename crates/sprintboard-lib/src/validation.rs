//! Validation helpers for sprintboard-lib.
//!
//! These routines enforce issue data constraints and return structured
//! validation errors without mutating the store.

use crate::error::ValidationError;
use crate::model::Issue;
use crate::query::{IssueUpdate, NewIssue};

const MAX_SUMMARY_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 102_400;
const MAX_COMMENT_LEN: usize = 51_200;

/// Validates issue fields and invariants.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a complete issue (used for hydrated tickets).
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(issue: &Issue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if issue.id.trim().is_empty() {
            errors.push(ValidationError::new("id", "cannot be empty"));
        }
        if issue.key.trim().is_empty() {
            errors.push(ValidationError::new("key", "cannot be empty"));
        }
        check_summary(&issue.summary, &mut errors);
        check_description(issue.description.as_deref(), &mut errors);
        check_story_points(issue.story_points, &mut errors);
        check_labels(&issue.labels, &mut errors);

        // Timestamps: created <= updated.
        if issue.updated < issue.created {
            errors.push(ValidationError::new("updated", "cannot be before created"));
        }

        finish(errors)
    }

    /// Validate the fields of a create command.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_new(new: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_summary(&new.summary, &mut errors);
        check_description(new.description.as_deref(), &mut errors);
        check_story_points(new.story_points, &mut errors);
        check_labels(&new.labels, &mut errors);
        finish(errors)
    }

    /// Validate the applicable fields of an update patch.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_update(update: &IssueUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Some(summary) = update.summary.as_deref() {
            check_summary(summary, &mut errors);
        }
        if let Some(description) = &update.description {
            check_description(description.as_deref(), &mut errors);
        }
        if let Some(points) = update.story_points {
            check_story_points(points, &mut errors);
        }
        if let Some(labels) = &update.labels {
            check_labels(labels, &mut errors);
        }
        finish(errors)
    }
}

fn check_summary(summary: &str, errors: &mut Vec<ValidationError>) {
    if summary.trim().is_empty() {
        errors.push(ValidationError::new("summary", "cannot be empty"));
    }
    if summary.len() > MAX_SUMMARY_LEN {
        errors.push(ValidationError::new("summary", "exceeds 500 characters"));
    }
}

fn check_description(description: Option<&str>, errors: &mut Vec<ValidationError>) {
    if description.is_some_and(|d| d.len() > MAX_DESCRIPTION_LEN) {
        errors.push(ValidationError::new("description", "exceeds 100KB"));
    }
}

fn check_story_points(points: Option<u32>, errors: &mut Vec<ValidationError>) {
    if points == Some(0) {
        errors.push(ValidationError::new("storyPoints", "must be a positive integer"));
    }
}

fn check_labels(labels: &[String], errors: &mut Vec<ValidationError>) {
    for label in labels {
        if let Err(err) = LabelValidator::validate(label) {
            errors.push(err);
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single label value.
pub struct LabelValidator;

impl LabelValidator {
    /// Validate a label: non-blank and at most 50 characters.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the label is invalid.
    pub fn validate(label: &str) -> Result<(), ValidationError> {
        if label.trim().is_empty() {
            return Err(ValidationError::new("labels", "label cannot be empty"));
        }

        if label.chars().count() > 50 {
            return Err(ValidationError::new("labels", "label exceeds 50 characters"));
        }

        Ok(())
    }
}

/// Validates comment fields.
pub struct CommentValidator;

impl CommentValidator {
    /// Validate a comment's author and body.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(author: &str, body: &str) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if body.trim().is_empty() {
            errors.push(ValidationError::new("body", "cannot be empty"));
        }

        if body.len() > MAX_COMMENT_LEN {
            errors.push(ValidationError::new("body", "exceeds 50KB"));
        }

        if author.trim().is_empty() {
            errors.push(ValidationError::new("author", "cannot be empty"));
        }

        if author.len() > 200 {
            errors.push(ValidationError::new("author", "exceeds 200 characters"));
        }

        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn base_issue() -> Issue {
        Issue {
            id: "1".to_string(),
            key: "PROJ-1".to_string(),
            summary: "Test issue".to_string(),
            created: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn issue_validation_accepts_base_issue() {
        assert!(IssueValidator::validate(&base_issue()).is_ok());
    }

    #[test]
    fn issue_validation_rejects_blank_summary() {
        let mut issue = base_issue();
        issue.summary = "   ".to_string();

        let errors = IssueValidator::validate(&issue).unwrap_err();
        assert!(errors.iter().any(|err| err.field == "summary"));
    }

    #[test]
    fn issue_validation_collects_multiple_errors() {
        let mut issue = base_issue();
        issue.id = String::new();
        issue.summary = String::new();
        issue.story_points = Some(0);
        issue.updated = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();

        let errors = IssueValidator::validate(&issue).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|err| err.field.as_str()).collect();
        assert!(fields.contains(&"id"));
        assert!(fields.contains(&"summary"));
        assert!(fields.contains(&"storyPoints"));
        assert!(fields.contains(&"updated"));
    }

    #[test]
    fn new_issue_validation_rejects_long_summary() {
        let new = NewIssue::new("x".repeat(501));
        let errors = IssueValidator::validate_new(&new).unwrap_err();
        assert_eq!(errors[0].field, "summary");
    }

    #[test]
    fn update_validation_only_checks_present_fields() {
        assert!(IssueValidator::validate_update(&IssueUpdate::default()).is_ok());

        let update = IssueUpdate {
            summary: Some(String::new()),
            ..Default::default()
        };
        assert!(IssueValidator::validate_update(&update).is_err());
    }

    #[test]
    fn label_validation_rejects_blank_and_long_labels() {
        let err = LabelValidator::validate("  ").unwrap_err();
        assert_eq!(err.field, "labels");
        assert!(LabelValidator::validate(&"x".repeat(51)).is_err());
        assert!(LabelValidator::validate("frontend").is_ok());
        assert!(LabelValidator::validate("good first issue").is_ok());
        assert!(LabelValidator::validate("ui/ux").is_ok());
    }

    #[test]
    fn comment_validation_rejects_empty_body() {
        let errors = CommentValidator::validate("You", " ").unwrap_err();
        assert!(errors.iter().any(|err| err.field == "body"));
    }
}
