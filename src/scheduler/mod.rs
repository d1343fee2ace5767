//! Availability resolution, partitioning, recommendation, and booking.
//!
//! The pieces a scheduling session runs after the skill matcher has
//! ranked the roster, plus the session state machine tying them together.
//!
//! # Algorithm
//!
//! `find_earliest_slot` is a greedy first-fit over the sorted busy
//! intervals of one designer. `partition_by_availability` runs it per
//! ranked designer and keeps rank order on both sides. `compose` only
//! selects and presents; it never re-scores.
//!
//! # Failure handling
//!
//! Infeasibility is a normal outcome, reported as data. A single
//! designer's calendar failure degrades that designer to "availability
//! unknown". Only an unreachable upstream aborts the session.
//!
//! # Reference
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2
//!   (interval scheduling with release dates and deadlines)

mod availability;
mod booking;
mod partition;
mod recommend;
mod session;

pub use availability::{find_earliest_slot, floor_to_minute};
pub use booking::BookingCommitter;
pub use partition::{partition_by_availability, resolve_candidate, Partition};
pub use recommend::{compose, Recommendation};
pub use session::{
    Booked, Confirmation, Partitioned, Ranked, Recommended, RosterLoaded, SessionStage,
};
