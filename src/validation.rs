//! Input validation for scheduling sessions.
//!
//! Checks structural integrity of the roster, the task requirement, and
//! designer calendars before they reach the engine. Detects:
//! - Empty or duplicate designer IDs
//! - Non-positive task durations
//! - Malformed calendar intervals (end <= start) or intervals filed
//!   under another designer
//!
//! Roster problems are session-fatal; calendar problems only affect the
//! one designer whose calendar is malformed.

use std::collections::HashSet;

use crate::models::{Calendar, Designer, TaskRequirement};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
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
    /// Two designers share the same ID.
    DuplicateId,
    /// A designer has a blank ID.
    EmptyId,
    /// The task's duration is zero or negative.
    NonPositiveDuration,
    /// A calendar interval ends at or before its start.
    MalformedInterval,
    /// A calendar interval belongs to a different resource.
    ForeignInterval,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn collect(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a roster snapshot.
///
/// Checks:
/// 1. No blank designer IDs
/// 2. No duplicate designer IDs
///
/// Duplicates would let one designer appear twice in a partition.
pub fn validate_roster(roster: &[Designer]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for designer in roster {
        if designer.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Designer with empty ID (name: '{}')", designer.name),
            ));
            continue;
        }
        if !seen.insert(designer.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate designer ID: {}", designer.id),
            ));
        }
    }

    collect(errors)
}

/// Validates a task requirement.
///
/// A deadline in the past is not an error: it simply makes every
/// designer infeasible.
pub fn validate_requirement(task: &TaskRequirement) -> ValidationResult {
    let mut errors = Vec::new();
    if task.duration_minutes <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            format!(
                "Task '{}' has non-positive duration ({} min)",
                task.task_id, task.duration_minutes
            ),
        ));
    }
    collect(errors)
}

/// Validates one designer's calendar.
///
/// Overlapping intervals are accepted; the resolver absorbs them.
pub fn validate_calendar(calendar: &Calendar) -> ValidationResult {
    let mut errors = Vec::new();

    for interval in &calendar.intervals {
        if !interval.slot.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedInterval,
                format!(
                    "Interval for '{}' ends at or before its start ({})",
                    calendar.resource_id, interval.slot
                ),
            ));
        }
        if interval.resource_id != calendar.resource_id {
            errors.push(ValidationError::new(
                ValidationErrorKind::ForeignInterval,
                format!(
                    "Calendar of '{}' contains an interval for '{}'",
                    calendar.resource_id, interval.resource_id
                ),
            ));
        }
    }

    collect(errors)
}
