//! Recommendation composer.
//!
//! Turns a partition into the suggestion shown to the operator. Purely
//! presentational: scores and availability are taken as computed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Partition;
use crate::config::RecommendationConfig;
use crate::models::{AvailabilityResult, AvailabilityStatus, TaskRequirement, UnavailableReason};

/// Operator-facing suggestion for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    /// At least one designer can meet the deadline.
    Assign {
        task_id: String,
        primary: AvailabilityResult,
        alternates: Vec<AvailabilityResult>,
        /// Designers that cannot make the deadline or whose calendar is unknown.
        unavailable_count: usize,
    },
    /// Nobody is free before the deadline; closest matches listed so the
    /// operator can renegotiate the deadline or reassign.
    NobodyAvailable {
        task_id: String,
        deadline: DateTime<Utc>,
        fallbacks: Vec<AvailabilityResult>,
    },
    /// The roster was empty.
    EmptyRoster { task_id: String },
}

impl Recommendation {
    /// The primary pick, if any.
    pub fn primary(&self) -> Option<&AvailabilityResult> {
        match self {
            Self::Assign { primary, .. } => Some(primary),
            _ => None,
        }
    }

    pub fn task_id(&self) -> &str {
        match self {
            Self::Assign { task_id, .. }
            | Self::NobodyAvailable { task_id, .. }
            | Self::EmptyRoster { task_id } => task_id,
        }
    }
}

/// Composes a recommendation from a partition.
pub fn compose(
    partition: &Partition,
    task: &TaskRequirement,
    config: &RecommendationConfig,
) -> Recommendation {
    if partition.is_empty() {
        return Recommendation::EmptyRoster {
            task_id: task.task_id.clone(),
        };
    }

    match partition.available.split_first() {
        Some((primary, rest)) => Recommendation::Assign {
            task_id: task.task_id.clone(),
            primary: primary.clone(),
            alternates: rest.iter().take(config.alternates).cloned().collect(),
            unavailable_count: partition.unavailable.len(),
        },
        None => Recommendation::NobodyAvailable {
            task_id: task.task_id.clone(),
            deadline: task.deadline,
            fallbacks: partition
                .unavailable
                .iter()
                .take(config.fallbacks)
                .cloned()
                .collect(),
        },
    }
}

fn write_candidate(f: &mut fmt::Formatter<'_>, r: &AvailabilityResult) -> fmt::Result {
    let c = &r.candidate;
    write!(f, "{} ({}), match {:.2}", c.designer_name, c.designer_id, c.score)?;
    match &r.status {
        AvailabilityStatus::Available { slot } => write!(f, ", free {slot}")?,
        AvailabilityStatus::Unavailable {
            reason: UnavailableReason::Infeasible,
        } => {
            write!(f, ": no slot before the deadline")?;
            if let Some(committed) = r.committed {
                write!(f, " ({}h already booked)", committed.num_minutes() as f64 / 60.0)?;
            }
        }
        AvailabilityStatus::Unavailable {
            reason: UnavailableReason::Unknown(detail),
        } => write!(f, ": availability unknown ({detail})")?,
    }
    Ok(())
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign {
                task_id,
                primary,
                alternates,
                unavailable_count,
            } => {
                write!(f, "Recommended for task {task_id}: ")?;
                write_candidate(f, primary)?;
                writeln!(f)?;
                if let Some(rationale) = &primary.candidate.rationale {
                    writeln!(f, "  Why: {rationale}")?;
                }
                if !alternates.is_empty() {
                    writeln!(f, "Alternates:")?;
                    for (i, alt) in alternates.iter().enumerate() {
                        write!(f, "  {}. ", i + 2)?;
                        write_candidate(f, alt)?;
                        writeln!(f)?;
                    }
                }
                if *unavailable_count > 0 {
                    writeln!(
                        f,
                        "{unavailable_count} other designer(s) cannot make the deadline or have unknown availability."
                    )?;
                }
                Ok(())
            }
            Self::NobodyAvailable {
                task_id,
                deadline,
                fallbacks,
            } => {
                writeln!(
                    f,
                    "No designer is free before the deadline {} for task {task_id}.",
                    deadline.format("%Y-%m-%d %H:%M UTC")
                )?;
                if !fallbacks.is_empty() {
                    writeln!(f, "Closest matches (renegotiate the deadline or reassign):")?;
                    for (i, fb) in fallbacks.iter().enumerate() {
                        write!(f, "  {}. ", i + 1)?;
                        write_candidate(f, fb)?;
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
            Self::EmptyRoster { task_id } => {
                writeln!(f, "No designers on the roster for task {task_id}; nothing to recommend.")
            }
        }
    }
}
