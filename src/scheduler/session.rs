//! Scheduling session as an explicit state machine.
//!
//! ```text
//! RosterLoaded --rank--> Ranked --partition--> Partitioned --recommend--> Recommended --confirm--> Booked
//!                                                                              ^   |
//!                                                                              +---+ conflict: re-offer
//! ```
//!
//! Each transition consumes the previous stage, so a stage always holds
//! everything earlier stages produced. The session clock is set at start
//! (floored to the minute) and only moves forward: `confirm` takes the
//! confirmation time, and re-offers resolve from the later of the two.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::availability::floor_to_minute;
use super::booking::BookingCommitter;
use super::partition::{partition_by_availability, resolve_candidate, Partition};
use super::recommend::{compose, Recommendation};
use crate::collaborators::{CalendarStore, RosterProvider, TaskSource};
use crate::config::EngineConfig;
use crate::error::{CollaboratorError, EngineError, Result};
use crate::matching::SkillMatcher;
use crate::models::{
    Booking, BookingRequest, Calendar, Designer, MatchResult, ReservationId, TaskRequirement,
    TimeSlot,
};
use crate::validation::{validate_requirement, validate_roster};

/// Stage names, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStage {
    RosterLoaded,
    Ranked,
    Partitioned,
    Recommended,
    Booked,
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RosterLoaded => "roster_loaded",
            Self::Ranked => "ranked",
            Self::Partitioned => "partitioned",
            Self::Recommended => "recommended",
            Self::Booked => "booked",
        };
        f.write_str(name)
    }
}

/// Task requirement and roster snapshot loaded; nothing scored yet.
#[derive(Debug)]
pub struct RosterLoaded {
    task: TaskRequirement,
    roster: Vec<Designer>,
    now: DateTime<Utc>,
    config: EngineConfig,
}

impl RosterLoaded {
    /// Starts a session for a task held by the task source.
    ///
    /// The task's duration is estimated from its declared effort when
    /// needed (see [`TaskRequirement::from_record`]).
    pub fn start(
        tasks: &dyn TaskSource,
        roster: &dyn RosterProvider,
        task_id: &str,
        now: DateTime<Utc>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let record = tasks.get_task(task_id).map_err(|err| {
            if err.is_unreachable() {
                EngineError::unreachable("task source", &err)
            } else {
                EngineError::Collaborator(err)
            }
        })?;
        let task = TaskRequirement::from_record(&record, &config.estimation)?;
        Self::with_requirement(roster, task, now, config)
    }

    /// Starts a session for an already-built requirement.
    pub fn with_requirement(
        roster: &dyn RosterProvider,
        task: TaskRequirement,
        now: DateTime<Utc>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        validate_requirement(&task).map_err(EngineError::Validation)?;

        let roster = fetch_roster(roster, config.booking.roster_fetch_attempts)?;
        validate_roster(&roster).map_err(EngineError::Validation)?;

        let now = floor_to_minute(now);
        tracing::info!(
            task_id = %task.task_id,
            designers = roster.len(),
            deadline = %task.deadline,
            duration_minutes = task.duration_minutes,
            stage = %SessionStage::RosterLoaded,
            "scheduling session started"
        );
        Ok(Self {
            task,
            roster,
            now,
            config,
        })
    }

    pub fn stage(&self) -> SessionStage {
        SessionStage::RosterLoaded
    }

    pub fn task(&self) -> &TaskRequirement {
        &self.task
    }

    pub fn roster(&self) -> &[Designer] {
        &self.roster
    }

    /// Session clock, floored to the minute.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Scores and orders the roster.
    pub fn rank(self, matcher: &SkillMatcher) -> Ranked {
        let ranked = matcher.rank_designers(&self.task, &self.roster);
        tracing::info!(
            task_id = %self.task.task_id,
            top = ranked.first().map(|m| m.designer_id.as_str()).unwrap_or("-"),
            stage = %SessionStage::Ranked,
            "roster ranked"
        );
        Ranked {
            task: self.task,
            ranked,
            now: self.now,
            config: self.config,
        }
    }
}

fn fetch_roster(provider: &dyn RosterProvider, attempts: u32) -> Result<Vec<Designer>> {
    let attempts = attempts.max(1);
    let mut last_err = CollaboratorError::Unreachable("no attempt made".to_string());
    for attempt in 1..=attempts {
        match provider.get_roster() {
            Ok(roster) => return Ok(roster),
            Err(err) => {
                tracing::warn!(attempt, attempts, error = %err, "roster fetch failed");
                last_err = err;
            }
        }
    }
    Err(EngineError::unreachable("roster provider", &last_err))
}

/// Roster scored and ordered, best fit first.
#[derive(Debug)]
pub struct Ranked {
    task: TaskRequirement,
    ranked: Vec<MatchResult>,
    now: DateTime<Utc>,
    config: EngineConfig,
}

impl Ranked {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Ranked
    }

    pub fn task(&self) -> &TaskRequirement {
        &self.task
    }

    pub fn ranked(&self) -> &[MatchResult] {
        &self.ranked
    }

    /// Resolves every ranked designer against the calendar store.
    ///
    /// A single designer's lookup failure (`NotFound`, `Failed`) degrades
    /// that designer to "availability unknown".
    ///
    /// `CollaboratorError::Unreachable` means the whole store is down: it
    /// aborts the session even when returned for just one designer.
    /// Stores should report per-designer timeouts as `Failed`.
    pub fn partition(self, store: &dyn CalendarStore) -> Result<Partitioned> {
        let mut calendars: HashMap<String, std::result::Result<Calendar, CollaboratorError>> =
            HashMap::with_capacity(self.ranked.len());
        for candidate in &self.ranked {
            let fetched = store.get_calendar(&candidate.designer_id);
            if let Err(err) = &fetched {
                if err.is_unreachable() {
                    tracing::error!(error = %err, "calendar store unreachable; aborting session");
                    return Err(EngineError::unreachable("calendar store", err));
                }
            }
            calendars.insert(candidate.designer_id.clone(), fetched);
        }

        let partition = partition_by_availability(&self.ranked, &self.task, self.now, |id| {
            calendars
                .remove(id)
                .unwrap_or_else(|| Err(CollaboratorError::NotFound(format!("calendar of '{id}'"))))
        });
        tracing::info!(
            task_id = %self.task.task_id,
            available = partition.available.len(),
            unavailable = partition.unavailable.len(),
            stage = %SessionStage::Partitioned,
            "roster partitioned"
        );

        Ok(Partitioned {
            task: self.task,
            partition,
            now: self.now,
            config: self.config,
        })
    }
}

/// Designers split by feasibility.
#[derive(Debug)]
pub struct Partitioned {
    task: TaskRequirement,
    partition: Partition,
    now: DateTime<Utc>,
    config: EngineConfig,
}

impl Partitioned {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Partitioned
    }

    pub fn task(&self) -> &TaskRequirement {
        &self.task
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn recommend(self) -> Recommended {
        let recommendation = compose(&self.partition, &self.task, &self.config.recommendation);
        tracing::info!(
            task_id = %self.task.task_id,
            primary = recommendation
                .primary()
                .map(|p| p.designer_id())
                .unwrap_or("-"),
            stage = %SessionStage::Recommended,
            "recommendation composed"
        );
        Recommended {
            task: self.task,
            partition: self.partition,
            recommendation,
            now: self.now,
            config: self.config,
        }
    }
}

/// A recommendation is on offer and awaits the operator's pick.
#[derive(Debug)]
pub struct Recommended {
    task: TaskRequirement,
    partition: Partition,
    recommendation: Recommendation,
    now: DateTime<Utc>,
    config: EngineConfig,
}

/// Outcome of confirming a designer.
#[derive(Debug)]
pub enum Confirmation {
    /// The booking is committed.
    Booked(Booked),
    /// The offered slot was taken concurrently. The designer was
    /// re-resolved against a fresh calendar and a new offer composed.
    Reoffered {
        session: Recommended,
        previous: TimeSlot,
    },
    /// Nothing was written; the offer stands.
    Rejected {
        session: Recommended,
        error: EngineError,
    },
}

impl Recommended {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Recommended
    }

    pub fn task(&self) -> &TaskRequirement {
        &self.task
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    /// Books the slot offered to `designer_id`.
    ///
    /// Any available designer may be confirmed, not just the primary pick.
    /// `now` is the confirmation time; it never moves the session clock
    /// backwards. An offer that already started by then is re-resolved
    /// instead of booked, as is one taken concurrently.
    ///
    /// Returns `Err` only when the calendar store is unreachable.
    pub fn confirm(
        self,
        designer_id: &str,
        committer: &BookingCommitter<'_>,
        now: DateTime<Utc>,
    ) -> Result<Confirmation> {
        let now = floor_to_minute(now).max(self.now);
        let Some((candidate, slot)) = self
            .partition
            .find_available(designer_id)
            .and_then(|r| r.slot().map(|slot| (r.candidate.clone(), *slot)))
        else {
            tracing::warn!(designer_id, "confirmed designer holds no offered slot");
            return Ok(Confirmation::Rejected {
                error: EngineError::NotOffered {
                    designer_id: designer_id.to_string(),
                },
                session: self,
            });
        };

        if slot.start < now {
            tracing::info!(designer_id, %slot, %now, "offered slot already started; re-resolving");
            let calendar = refetch_calendar(committer.store(), designer_id)?;
            return Ok(self.reoffer(&candidate, calendar, slot, now));
        }

        let request = self.booking_request(designer_id, slot);
        match committer.book(request) {
            Ok(booking) => {
                tracing::info!(
                    task_id = %self.task.task_id,
                    reservation_id = %booking.reservation_id,
                    stage = %SessionStage::Booked,
                    "session complete"
                );
                Ok(Confirmation::Booked(Booked {
                    task: self.task,
                    booking,
                }))
            }
            Err(EngineError::BookingConflict { .. }) => {
                let calendar = refetch_calendar(committer.store(), designer_id)?;
                Ok(self.reoffer(&candidate, calendar, slot, now))
            }
            Err(err @ EngineError::UpstreamUnreachable { .. }) => Err(err),
            Err(error) => {
                tracing::warn!(designer_id, error = %error, "booking not written");
                Ok(Confirmation::Rejected {
                    session: self,
                    error,
                })
            }
        }
    }

    fn booking_request(&self, designer_id: &str, slot: TimeSlot) -> BookingRequest {
        let role = &self.config.booking.role_tag;
        let title = if self.task.name.trim().is_empty() {
            self.task.task_id.as_str()
        } else {
            self.task.name.as_str()
        };
        BookingRequest::new(designer_id, self.task.task_id.clone(), slot, role.clone())
            .with_parent(self.task.parent_task_id.clone())
            .with_label(format!("{title} ({role})"))
    }

    /// Re-resolves one designer from `now` and recomposes the offer.
    fn reoffer(
        mut self,
        candidate: &MatchResult,
        calendar: std::result::Result<Calendar, CollaboratorError>,
        previous: TimeSlot,
        now: DateTime<Utc>,
    ) -> Confirmation {
        self.now = now;
        let refreshed = resolve_candidate(candidate, calendar, &self.task, self.now);
        tracing::info!(
            designer_id = %candidate.designer_id,
            %previous,
            refreshed = ?refreshed.slot().map(ToString::to_string),
            "re-offering"
        );
        self.partition.update(refreshed);
        self.recommendation = compose(&self.partition, &self.task, &self.config.recommendation);
        Confirmation::Reoffered {
            session: self,
            previous,
        }
    }
}

/// Fetches one calendar again; only an unreachable store is an error.
fn refetch_calendar(
    store: &dyn CalendarStore,
    designer_id: &str,
) -> Result<std::result::Result<Calendar, CollaboratorError>> {
    match store.get_calendar(designer_id) {
        Err(err) if err.is_unreachable() => Err(EngineError::unreachable("calendar store", &err)),
        fetched => Ok(fetched),
    }
}

/// Terminal stage: the booking is committed.
#[derive(Debug)]
pub struct Booked {
    task: TaskRequirement,
    booking: Booking,
}

impl Booked {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Booked
    }

    pub fn task(&self) -> &TaskRequirement {
        &self.task
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    pub fn reservation_id(&self) -> &ReservationId {
        &self.booking.reservation_id
    }

    pub fn into_booking(self) -> Booking {
        self.booking
    }
}
