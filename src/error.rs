//! Error types.
//!
//! Under-capacity is never an error: it is reported through the ledger's
//! overflow set. Errors here mean the requested operation did not run.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by assignment operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    /// The run input is malformed; nothing was assigned.
    #[error("invalid assignment configuration: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// A meeting date outside the pool's configured dates.
    #[error("unknown meeting date '{date}' for project '{project}'")]
    UnknownMeetingDate { project: String, date: String },

    /// The storage collaborator failed to load or save a ledger.
    #[error("ledger store error for dataset '{dataset}': {message}")]
    Store { dataset: String, message: String },
}

impl AssignError {
    /// Whether the error is a rejected configuration (admin-facing).
    pub fn is_configuration(&self) -> bool {
        matches!(self, AssignError::Configuration(_))
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, AssignError>;
