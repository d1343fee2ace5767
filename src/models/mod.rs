//! Scheduling domain models.
//!
//! Data types shared by the matcher, resolver, partitioner, composer, and
//! booking committer.
//!
//! # Domain Mappings
//!
//! | designer-schedule | Project backend | Calendar store |
//! |-------------------|-----------------|----------------|
//! | TaskRecord | Task | - |
//! | Designer | Staff member | Resource |
//! | BookedInterval | - | Calendar entry |
//! | Booking | Assignment | Reservation |

mod booking;
mod calendar;
mod candidate;
mod designer;
mod task;

pub use booking::{Booking, BookingMetadata, BookingRequest, ReservationId};
pub use calendar::{BookedInterval, Calendar, TimeSlot};
pub use candidate::{AvailabilityResult, AvailabilityStatus, MatchResult, UnavailableReason};
pub use designer::{Designer, Skill};
pub use task::{Category, EffortEstimate, TaskRecord, TaskRequirement};
