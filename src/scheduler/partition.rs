//! Candidate partitioner: splits a ranked roster by feasibility.
//!
//! Runs the availability resolver for every ranked designer and places
//! each one in exactly one of `available` or `unavailable`, preserving
//! rank order within both. A designer whose calendar cannot be fetched
//! (or is malformed) is degraded to "availability unknown" instead of
//! failing the whole pass.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::availability::{find_earliest_slot, floor_to_minute};
use crate::error::CollaboratorError;
use crate::models::{AvailabilityResult, Calendar, MatchResult, TaskRequirement};
use crate::validation::validate_calendar;

/// Ranked designers split by whether they can meet the deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Feasible designers, best match first, each with a resolved slot.
    pub available: Vec<AvailabilityResult>,
    /// Infeasible or unknown designers, best match first.
    pub unavailable: Vec<AvailabilityResult>,
    /// Ranked designer ids, used to keep rank order on updates.
    rank_order: Vec<String>,
}

impl Partition {
    /// Total designers across both sides.
    pub fn len(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The available entry for a designer, if any.
    pub fn find_available(&self, designer_id: &str) -> Option<&AvailabilityResult> {
        self.available.iter().find(|r| r.designer_id() == designer_id)
    }

    /// Replaces a designer's entry, moving it between sides if its status
    /// changed. Rank order is preserved on both sides.
    ///
    /// Ignores designers that were not part of the ranked input.
    pub fn update(&mut self, result: AvailabilityResult) {
        let Some(rank) = self
            .rank_order
            .iter()
            .position(|id| id == result.designer_id())
        else {
            return;
        };

        self.available.retain(|r| r.designer_id() != result.designer_id());
        self.unavailable.retain(|r| r.designer_id() != result.designer_id());

        let positions: HashMap<&str, usize> = self
            .rank_order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let side = if result.is_available() {
            &mut self.available
        } else {
            &mut self.unavailable
        };
        let at = side
            .iter()
            .position(|r| positions.get(r.designer_id()).copied().unwrap_or(usize::MAX) > rank)
            .unwrap_or(side.len());
        side.insert(at, result);
    }
}

/// Resolves one ranked designer against a calendar lookup outcome.
pub fn resolve_candidate(
    candidate: &MatchResult,
    calendar: Result<Calendar, CollaboratorError>,
    task: &TaskRequirement,
    now: DateTime<Utc>,
) -> AvailabilityResult {
    let calendar = match calendar {
        Ok(calendar) => calendar,
        Err(err) => {
            tracing::warn!(
                designer_id = %candidate.designer_id,
                error = %err,
                "calendar unavailable; availability unknown"
            );
            return AvailabilityResult::unknown(
                candidate.clone(),
                format!("calendar fetch failed: {err}"),
            );
        }
    };

    if let Err(errors) = validate_calendar(&calendar) {
        let detail = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(
            designer_id = %candidate.designer_id,
            %detail,
            "malformed calendar; availability unknown"
        );
        return AvailabilityResult::unknown(candidate.clone(), format!("malformed calendar: {detail}"));
    }

    let now = floor_to_minute(now);
    let committed = calendar.busy_time_in_range(now, task.deadline);
    match find_earliest_slot(&calendar.intervals, task.duration(), task.deadline, now) {
        Some(slot) => {
            tracing::debug!(designer_id = %candidate.designer_id, %slot, "slot resolved");
            AvailabilityResult::available(candidate.clone(), slot, committed)
        }
        None => {
            tracing::debug!(designer_id = %candidate.designer_id, "no slot before deadline");
            AvailabilityResult::infeasible(candidate.clone(), committed)
        }
    }
}

/// Splits ranked designers into available and unavailable.
///
/// `calendar_lookup` is called once per designer, in rank order. The
/// ranked input is not modified; every designer lands on exactly one side.
pub fn partition_by_availability<F>(
    ranked: &[MatchResult],
    task: &TaskRequirement,
    now: DateTime<Utc>,
    mut calendar_lookup: F,
) -> Partition
where
    F: FnMut(&str) -> Result<Calendar, CollaboratorError>,
{
    let mut partition = Partition {
        rank_order: ranked.iter().map(|m| m.designer_id.clone()).collect(),
        ..Partition::default()
    };

    for candidate in ranked {
        let calendar = calendar_lookup(&candidate.designer_id);
        let result = resolve_candidate(candidate, calendar, task, now);
        if result.is_available() {
            partition.available.push(result);
        } else {
            partition.unavailable.push(result);
        }
    }

    partition
}
