//! External collaborators the engine consumes.
//!
//! The roster provider, calendar store, task source, and notification sink
//! live outside this crate (project backend, calendar service, chat). The
//! engine only sees these traits; calls block from its point of view.
//!
//! `memory` provides in-process implementations for embedding and tests.

mod memory;

pub use memory::{InMemoryCalendarStore, InMemoryTaskSource, RecordingNotifier, StaticRoster};

use crate::error::CollaboratorError;
use crate::models::{Booking, BookingRequest, Calendar, Designer, ReservationId, TaskRecord};

/// Supplies the designers eligible for assignment.
pub trait RosterProvider: Send + Sync {
    /// Returns a consistent roster snapshot. Failures are retryable.
    fn get_roster(&self) -> Result<Vec<Designer>, CollaboratorError>;
}

/// Ledger of booked intervals per designer.
///
/// The store, not the engine, owns the no-overlap guarantee: a write that
/// would overlap an existing interval must fail with
/// `CollaboratorError::Conflict`.
pub trait CalendarStore: Send + Sync {
    /// Returns the committed intervals of one designer.
    ///
    /// `CollaboratorError::Unreachable` means the whole store is down and
    /// aborts the session; report a failure for one designer as `Failed`.
    fn get_calendar(&self, designer_id: &str) -> Result<Calendar, CollaboratorError>;

    /// Conditionally writes a booking.
    fn write_booking(&self, request: &BookingRequest) -> Result<ReservationId, CollaboratorError>;
}

/// Supplies the task being scheduled.
pub trait TaskSource: Send + Sync {
    fn get_task(&self, task_id: &str) -> Result<TaskRecord, CollaboratorError>;
}

/// Informed after a booking is committed.
///
/// Fire-and-forget: a failure here never rolls a booking back.
pub trait NotificationSink: Send + Sync {
    fn booking_confirmed(&self, booking: &Booking) -> Result<(), CollaboratorError>;
}
