//! Input validation for assignment runs.
//!
//! Checks structural integrity of the run input before any reviewer is
//! picked. Detects:
//! - Duplicate project keys
//! - Blank project keys
//! - A target reviewer count of zero
//!
//! Every problem is collected so the admin sees them all at once.

use crate::models::ReviewerPool;
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same project key appears more than once.
    DuplicateProject,
    /// A project key is empty or whitespace.
    BlankProject,
    /// The target reviewer count is zero.
    InvalidReviewerCount,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of an assignment run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_run_input(projects: &[String], pool: &ReviewerPool) -> ValidationResult {
    let mut errors = Vec::new();

    if pool.reviewer_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidReviewerCount,
            "Reviewer count must be at least 1",
        ));
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for project in projects {
        if project.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankProject,
                "Project key must not be blank",
            ));
            continue;
        }
        if !seen.insert(project.as_str()) && reported.insert(project.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProject,
                format!("Duplicate project key: {project}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
