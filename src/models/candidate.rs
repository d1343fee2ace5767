//! Per-request candidate results: match scores and availability.
//!
//! Both are ephemeral and recomputed for every scheduling request.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A designer's skill fit for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub designer_id: String,
    pub designer_name: String,
    /// Relevance score in [0, 100], rounded to two decimals.
    pub score: f64,
    /// Why the designer scored as they did.
    pub rationale: Option<String>,
    /// False when the designer carries no profile data at all.
    pub has_profile: bool,
}

impl MatchResult {
    /// Result for a designer with no profile data.
    pub fn no_information(designer_id: impl Into<String>, designer_name: impl Into<String>) -> Self {
        Self {
            designer_id: designer_id.into(),
            designer_name: designer_name.into(),
            score: 0.0,
            rationale: Some("no match information".to_string()),
            has_profile: false,
        }
    }
}

/// Outcome of resolving one designer's availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// A slot exists before the deadline.
    Available { slot: TimeSlot },
    Unavailable { reason: UnavailableReason },
}

/// Why a designer landed in the unavailable partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Calendar known; no slot fits before the deadline.
    Infeasible,
    /// Calendar could not be fetched or was malformed.
    Unknown(String),
}

/// A ranked designer with resolved availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub candidate: MatchResult,
    pub status: AvailabilityStatus,
    /// Time already committed between now and the deadline.
    /// `None` when the calendar is unknown.
    #[serde(with = "opt_minutes")]
    pub committed: Option<Duration>,
}

impl AvailabilityResult {
    pub fn available(candidate: MatchResult, slot: TimeSlot, committed: Duration) -> Self {
        Self {
            candidate,
            status: AvailabilityStatus::Available { slot },
            committed: Some(committed),
        }
    }

    pub fn infeasible(candidate: MatchResult, committed: Duration) -> Self {
        Self {
            candidate,
            status: AvailabilityStatus::Unavailable {
                reason: UnavailableReason::Infeasible,
            },
            committed: Some(committed),
        }
    }

    pub fn unknown(candidate: MatchResult, detail: impl Into<String>) -> Self {
        Self {
            candidate,
            status: AvailabilityStatus::Unavailable {
                reason: UnavailableReason::Unknown(detail.into()),
            },
            committed: None,
        }
    }

    #[inline]
    pub fn designer_id(&self) -> &str {
        &self.candidate.designer_id
    }

    /// The resolved slot, if the designer is available.
    pub fn slot(&self) -> Option<&TimeSlot> {
        match &self.status {
            AvailabilityStatus::Available { slot } => Some(slot),
            AvailabilityStatus::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.slot().is_some()
    }
}

/// Serialises an optional duration as whole minutes.
mod opt_minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.num_minutes()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<i64>::deserialize(d)?.map(Duration::minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candidate(id: &str) -> MatchResult {
        MatchResult {
            designer_id: id.to_string(),
            designer_name: id.to_string(),
            score: 50.0,
            rationale: None,
            has_profile: true,
        }
    }

    #[test]
    fn test_available_exposes_slot() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let slot = TimeSlot::starting_at(start, Duration::hours(2));
        let r = AvailabilityResult::available(candidate("A"), slot, Duration::hours(1));
        assert!(r.is_available());
        assert_eq!(r.slot(), Some(&slot));
        assert_eq!(r.designer_id(), "A");
    }

    #[test]
    fn test_unknown_has_no_slot_or_load() {
        let r = AvailabilityResult::unknown(candidate("B"), "calendar fetch failed");
        assert!(!r.is_available());
        assert!(r.committed.is_none());
        assert_eq!(
            r.status,
            AvailabilityStatus::Unavailable {
                reason: UnavailableReason::Unknown("calendar fetch failed".into())
            }
        );
    }

    #[test]
    fn test_serializes_status_and_minutes() {
        let r = AvailabilityResult::infeasible(candidate("C"), Duration::minutes(90));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"]["status"], "unavailable");
        assert_eq!(json["status"]["reason"]["kind"], "infeasible");
        assert_eq!(json["committed"], 90);

        let back: AvailabilityResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_no_information_result() {
        let m = MatchResult::no_information("D", "Dee");
        assert_eq!(m.score, 0.0);
        assert!(!m.has_profile);
        assert_eq!(m.rationale.as_deref(), Some("no match information"));
    }
}
