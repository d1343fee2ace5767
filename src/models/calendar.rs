//! Calendar and time slot models.
//!
//! A designer's calendar is the list of intervals already committed in the
//! calendar store. The engine only reads it to find free time.
//!
//! # Time Model
//! Timestamps are UTC. Intervals are half-open `[start, end)`: an interval
//! ending at 10:00 does not overlap one starting at 10:00.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates a slot of `duration` starting at `start`.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether two slots overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `end > start`.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M UTC"),
            self.end.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// An interval already committed for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    /// Resource (designer) the interval belongs to.
    pub resource_id: String,
    pub slot: TimeSlot,
}

impl BookedInterval {
    pub fn new(resource_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            resource_id: resource_id.into(),
            slot: TimeSlot::new(start, end),
        }
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.slot.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.slot.end
    }
}

/// A designer's committed intervals.
///
/// Order is not guaranteed by the store; consumers sort as needed.
/// Overlapping entries are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub resource_id: String,
    pub intervals: Vec<BookedInterval>,
}

impl Calendar {
    /// Creates an empty calendar (always free).
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            intervals: Vec::new(),
        }
    }

    /// Adds a committed interval.
    pub fn with_booking(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let interval = BookedInterval::new(self.resource_id.clone(), start, end);
        self.intervals.push(interval);
        self
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether a candidate slot collides with any committed interval.
    pub fn conflicts_with(&self, slot: &TimeSlot) -> bool {
        self.intervals.iter().any(|i| i.slot.overlaps(slot))
    }

    /// Total committed time inside `[start, end)`.
    ///
    /// Overlapping intervals are merged first, so double-entered
    /// commitments are counted once.
    pub fn busy_time_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Duration {
        if end <= start {
            return Duration::zero();
        }

        let mut clipped: Vec<(DateTime<Utc>, DateTime<Utc>)> = self
            .intervals
            .iter()
            .map(|i| (i.start().max(start), i.end().min(end)))
            .filter(|(s, e)| e > s)
            .collect();
        clipped.sort();

        let mut busy = Duration::zero();
        let mut covered_until = start;
        for (s, e) in clipped {
            let s = s.max(covered_until);
            if e > s {
                busy = busy + (e - s);
                covered_until = e;
            }
        }
        busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_time_slot() {
        let s = TimeSlot::new(at(9), at(11));
        assert_eq!(s.duration(), Duration::hours(2));
        assert!(s.is_well_formed());
        assert!(!TimeSlot::new(at(11), at(9)).is_well_formed());
    }

    #[test]
    fn test_time_slot_overlap() {
        let a = TimeSlot::new(at(9), at(11));
        let b = TimeSlot::new(at(10), at(12));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeSlot::new(at(11), at(12)); // touching but not overlapping
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_calendar_conflicts() {
        let cal = Calendar::new("D1").with_booking(at(9), at(11));
        assert!(cal.conflicts_with(&TimeSlot::new(at(10), at(12))));
        assert!(!cal.conflicts_with(&TimeSlot::new(at(11), at(12))));
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.intervals[0].resource_id, "D1");
    }

    #[test]
    fn test_busy_time_merges_overlaps() {
        let cal = Calendar::new("D1")
            .with_booking(at(9), at(12))
            .with_booking(at(10), at(11)) // nested duplicate commitment
            .with_booking(at(14), at(16));

        assert_eq!(cal.busy_time_in_range(at(8), at(18)), Duration::hours(5));
        assert_eq!(cal.busy_time_in_range(at(11), at(15)), Duration::hours(2));
        assert_eq!(cal.busy_time_in_range(at(15), at(9)), Duration::zero());
    }

    #[test]
    fn test_display() {
        let s = TimeSlot::new(at(9), at(13));
        assert_eq!(s.to_string(), "2026-03-02 09:00 UTC to 2026-03-02 13:00 UTC");
    }
}
