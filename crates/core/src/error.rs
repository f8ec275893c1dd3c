use crate::state::VersionState;

/// Errors surfaced by the versioning core and its storage collaborators.
///
/// Every kind maps to a distinct, stable message and [`CoreError::code`] so
/// that upper layers can translate them without string matching.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: VersionState, to: VersionState },

    #[error("Version is already in the {state} state")]
    NoOpTransition { state: VersionState },

    #[error("Cannot clone a record which has not been saved")]
    UnsavedRecord,

    #[error("Unique constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cloning relations is not supported: {0}")]
    UnsupportedRelationClone(String),
}

impl CoreError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::NoOpTransition { .. } => "NO_OP_TRANSITION",
            Self::UnsavedRecord => "UNSAVED_RECORD",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnsupportedRelationClone(_) => "UNSUPPORTED_RELATION_CLONE",
        }
    }
}
