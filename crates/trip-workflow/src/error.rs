//! Error types for the trip workflow

use chrono::NaiveDate;
use thiserror::Error;

use crate::stage::{Operation, Stage};

/// Result type alias using WorkflowError
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Boxed cause carried by transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the workflow commands
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Search criteria failed validation; nothing was sent
    #[error("Invalid search criteria: {0}")]
    Validation(#[from] ValidationError),

    /// The destination is not one of the current search results
    #[error("Unknown destination: {destination}")]
    InvalidSelection { destination: String },

    /// The command is not allowed from the current stage
    #[error("Cannot {operation} while workflow is {stage}")]
    InvalidState { operation: Operation, stage: Stage },

    /// The backend call failed; the workflow moved to `Failed`
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl WorkflowError {
    /// Create an invalid-state error for `operation` attempted in `stage`
    pub fn invalid_state(operation: Operation, stage: Stage) -> Self {
        Self::InvalidState { operation, stage }
    }

    /// Whether this error left the workflow state untouched
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Collaborator(_))
    }
}

/// Malformed or missing search criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date for '{field}': {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Budget must be greater than zero, got {0}")]
    NonPositiveBudget(f64),

    #[error("Start date {start} is after end date {end}")]
    DateOrder { start: NaiveDate, end: NaiveDate },
}

/// Failure of a collaborator call
///
/// Transport failures, timeouts, bad statuses, backend-reported errors and
/// undecodable payloads all collapse into this one kind. The variants only
/// exist for diagnostics.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Request failed: {0}")]
    Transport(#[source] BoxError),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl CollaboratorError {
    /// Wrap any error as a transport failure
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// Create a decode error with a message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
