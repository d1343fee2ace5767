//! Error types for the scheduling engine.
//!
//! Infeasibility (no slot before the deadline) is not an error and never
//! appears here; it is reported through `AvailabilityStatus` and
//! `Recommendation::NobodyAvailable`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Roster provider, task source, or calendar store could not be reached.
    /// Fatal for the current session.
    #[error("{service} unreachable: {reason}")]
    UpstreamUnreachable { service: String, reason: String },

    /// The calendar store rejected a booking because the slot is taken.
    /// Retryable: re-resolve against a fresh calendar.
    #[error("booking conflict for designer '{designer_id}'")]
    BookingConflict { designer_id: String },

    #[error("invalid task requirement: {0}")]
    InvalidRequirement(String),

    #[error("invalid input: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// The operator picked a designer that holds no resolved slot.
    #[error("designer '{designer_id}' has no offered slot in this session")]
    NotOffered { designer_id: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Errors returned by external collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The service as a whole cannot be reached.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// A conditional booking write was rejected: the interval overlaps.
    #[error("interval conflicts with an existing booking")]
    Conflict,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Failed(String),
}

impl CollaboratorError {
    /// Whether the whole upstream is down (as opposed to one call failing).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl EngineError {
    pub(crate) fn unreachable(service: &str, err: &CollaboratorError) -> Self {
        Self::UpstreamUnreachable {
            service: service.to_string(),
            reason: err.to_string(),
        }
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_conflict_is_distinguishable() {
        assert_ne!(CollaboratorError::Conflict, CollaboratorError::Failed("x".into()));
        assert!(!CollaboratorError::Conflict.is_unreachable());
        assert!(CollaboratorError::Unreachable("down".into()).is_unreachable());
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = EngineError::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate designer ID: A"),
            ValidationError::new(ValidationErrorKind::EmptyId, "Designer with empty ID"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate designer ID: A; Designer with empty ID"
        );
    }

    #[test]
    fn test_unreachable_message() {
        let err = EngineError::unreachable(
            "roster provider",
            &CollaboratorError::Unreachable("timeout".into()),
        );
        assert_eq!(err.to_string(), "roster provider unreachable: unreachable: timeout");
    }
}
