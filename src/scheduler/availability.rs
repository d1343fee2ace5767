//! Availability resolver: earliest free slot before a deadline.
//!
//! # Algorithm
//!
//! Greedy first-fit over a sorted free/busy timeline:
//!
//! 1. Sort intervals by start.
//! 2. Start the cursor at `now` (floored to the minute).
//! 3. For each interval: if `[cursor, cursor + d)` ends by the interval's
//!    start and by the deadline, that gap is the answer. Otherwise move
//!    the cursor to `max(cursor, interval.end)`.
//! 4. After the last interval, the slot at the cursor is the answer if it
//!    ends by the deadline.
//!
//! Taking `max` absorbs overlapping or nested intervals. Any earlier slot
//! would have been found by an earlier gap check, so the result is the
//! earliest feasible one.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the scan.

use chrono::{DateTime, Duration, Utc};

use crate::models::{BookedInterval, TimeSlot};

/// Floors a timestamp to the start of its minute.
///
/// Keeps comparisons stable across sub-second timing differences.
pub fn floor_to_minute(time: DateTime<Utc>) -> DateTime<Utc> {
    let secs = time.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(60), 0).unwrap_or(time)
}

/// Finds the earliest slot of `duration` that starts no earlier than
/// `now` and ends no later than `deadline`.
///
/// `calendar` may be unsorted and may contain overlapping intervals.
/// Returns `None` when no such slot exists (including a past deadline or
/// a non-positive duration). That is an expected outcome, not a fault.
pub fn find_earliest_slot(
    calendar: &[BookedInterval],
    duration: Duration,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<TimeSlot> {
    if duration <= Duration::zero() {
        return None;
    }

    let mut sorted: Vec<&BookedInterval> = calendar.iter().collect();
    sorted.sort_by_key(|i| (i.start(), i.end()));

    let mut cursor = floor_to_minute(now);
    for interval in sorted {
        // Overflow past the representable range cannot meet any deadline.
        let candidate_end = cursor.checked_add_signed(duration)?;
        if candidate_end > deadline {
            // The cursor never moves back; nothing later can fit.
            return None;
        }
        if candidate_end <= interval.start() {
            return Some(TimeSlot::new(cursor, candidate_end));
        }
        cursor = cursor.max(interval.end());
    }

    let candidate_end = cursor.checked_add_signed(duration)?;
    if candidate_end <= deadline {
        Some(TimeSlot::new(cursor, candidate_end))
    } else {
        None
    }
}
