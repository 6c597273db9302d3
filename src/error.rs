//! Error handling module for the playbook
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Storage failures are absorbed inside the wizard controller; the variants
//! here are what callers see when an edit is rejected.

use thiserror::Error;

/// Main error type for the playbook library
#[derive(Error, Debug)]
pub enum PlaybookError {
    /// IO errors (draft files, exported documents)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Draft storage backend errors (quota, disabled storage, injected failures)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Template id not present in the catalogue
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Text written to a list field or a list written to a text field
    #[error("Field {field} expects a {expected} value")]
    FieldKind {
        field: String,
        expected: &'static str,
    },

    /// Step index past the last wizard step
    #[error("Step {index} is out of range (wizard has {total} steps)")]
    StepOutOfRange { index: usize, total: usize },

    /// Moving back from the first step
    #[error("Already at the first step")]
    AtFirstStep,

    /// Step index beyond the next unvisited step
    #[error("Step {index} is not reachable yet (highest visited is {highest})")]
    StepNotReachable { index: usize, highest: usize },

    /// Risk index past the end of the risk list
    #[error("No risk at index {0}")]
    RiskIndex(usize),

    /// Attempt to remove one of the default risk entries
    #[error("Risk at index {0} is a default entry and cannot be removed")]
    DefaultRiskRemoval(usize),

    /// KPI index past the end of the KPI list
    #[error("No KPI at index {0}")]
    KpiIndex(usize),

    /// Edit attempted while a stored draft still awaits resume or discard
    #[error("A saved draft is waiting to be resumed or discarded")]
    DraftPending,

    /// ROI calculator input validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for playbook operations
pub type Result<T> = std::result::Result<T, PlaybookError>;

// Convenient error constructors
impl PlaybookError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
