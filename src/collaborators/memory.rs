//! In-process collaborator implementations.

use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use super::{CalendarStore, NotificationSink, RosterProvider, TaskSource};
use crate::error::CollaboratorError;
use crate::models::{Booking, BookingRequest, Calendar, Designer, ReservationId, TaskRecord};

/// Calendar store held in memory.
///
/// Writes are conditional: a booking overlapping any committed interval
/// of the same designer is rejected with `Conflict` and leaves the
/// calendar unchanged.
#[derive(Debug, Default)]
pub struct InMemoryCalendarStore {
    calendars: Mutex<HashMap<String, Calendar>>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a designer's calendar, replacing any existing one.
    pub fn with_calendar(self, calendar: Calendar) -> Self {
        self.calendars
            .lock()
            .insert(calendar.resource_id.clone(), calendar);
        self
    }

    /// Bookings written through this store, in write order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().clone()
    }
}

impl CalendarStore for InMemoryCalendarStore {
    fn get_calendar(&self, designer_id: &str) -> Result<Calendar, CollaboratorError> {
        Ok(self
            .calendars
            .lock()
            .get(designer_id)
            .cloned()
            .unwrap_or_else(|| Calendar::new(designer_id)))
    }

    fn write_booking(&self, request: &BookingRequest) -> Result<ReservationId, CollaboratorError> {
        if !request.slot.is_well_formed() {
            return Err(CollaboratorError::Failed(format!(
                "interval {} is empty or inverted",
                request.slot
            )));
        }

        let mut calendars = self.calendars.lock();
        let calendar = calendars
            .entry(request.designer_id.clone())
            .or_insert_with(|| Calendar::new(request.designer_id.clone()));
        if calendar.conflicts_with(&request.slot) {
            return Err(CollaboratorError::Conflict);
        }

        let reservation_id = ReservationId(Uuid::new_v4().to_string());
        let booking = Booking::from_request(reservation_id.clone(), request.clone());
        calendar.intervals.push(booking.as_interval());
        self.bookings.lock().push(booking);
        Ok(reservation_id)
    }
}

/// Roster fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    designers: Vec<Designer>,
}

impl StaticRoster {
    pub fn new(designers: Vec<Designer>) -> Self {
        Self { designers }
    }
}

impl RosterProvider for StaticRoster {
    fn get_roster(&self) -> Result<Vec<Designer>, CollaboratorError> {
        Ok(self.designers.clone())
    }
}

/// Task records keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    tasks: HashMap<String, TaskRecord>,
}

impl InMemoryTaskSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, record: TaskRecord) -> Self {
        self.tasks.insert(record.id.clone(), record);
        self
    }
}

impl TaskSource for InMemoryTaskSource {
    fn get_task(&self, task_id: &str) -> Result<TaskRecord, CollaboratorError> {
        self.tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("task '{task_id}'")))
    }
}

/// Notification sink that records what it was told.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Booking>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Booking> {
        self.sent.lock().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn booking_confirmed(&self, booking: &Booking) -> Result<(), CollaboratorError> {
        self.sent.lock().push(booking.clone());
        Ok(())
    }
}
