//! Booking committer.
//!
//! Writes one interval to the calendar store. The store's conditional
//! write is the only guard against double-booking; a rejected write
//! surfaces as [`EngineError::BookingConflict`] and is never retried here.

use crate::collaborators::{CalendarStore, NotificationSink};
use crate::error::{CollaboratorError, EngineError, Result};
use crate::models::{Booking, BookingRequest};

/// Commits operator-confirmed bookings.
pub struct BookingCommitter<'a> {
    store: &'a dyn CalendarStore,
    notifier: Option<&'a dyn NotificationSink>,
}

impl<'a> BookingCommitter<'a> {
    pub fn new(store: &'a dyn CalendarStore) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Notifies `notifier` after every successful write.
    pub fn with_notifier(mut self, notifier: &'a dyn NotificationSink) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(&self) -> &'a dyn CalendarStore {
        self.store
    }

    /// Writes the booking.
    ///
    /// On success the store holds exactly one new interval. On conflict the
    /// store is unchanged. Notification failures are logged and do not
    /// affect the result.
    pub fn book(&self, request: BookingRequest) -> Result<Booking> {
        let reservation_id = match self.store.write_booking(&request) {
            Ok(id) => id,
            Err(CollaboratorError::Conflict) => {
                tracing::info!(
                    designer_id = %request.designer_id,
                    slot = %request.slot,
                    "booking rejected: slot taken"
                );
                return Err(EngineError::BookingConflict {
                    designer_id: request.designer_id,
                });
            }
            Err(err) if err.is_unreachable() => {
                return Err(EngineError::unreachable("calendar store", &err));
            }
            Err(err) => return Err(err.into()),
        };

        let booking = Booking::from_request(reservation_id, request);
        tracing::info!(
            reservation_id = %booking.reservation_id,
            designer_id = %booking.designer_id,
            task_id = %booking.task_id(),
            slot = %booking.slot,
            "booking committed"
        );

        if let Some(notifier) = self.notifier {
            if let Err(err) = notifier.booking_confirmed(&booking) {
                tracing::warn!(
                    reservation_id = %booking.reservation_id,
                    error = %err,
                    "booking notification failed"
                );
            }
        }

        Ok(booking)
    }
}

impl std::fmt::Debug for BookingCommitter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingCommitter")
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{InMemoryCalendarStore, RecordingNotifier};
    use crate::models::{Calendar, ReservationId, TimeSlot};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    fn request(designer: &str, start: u32, end: u32) -> BookingRequest {
        BookingRequest::new(designer, "T1", TimeSlot::new(at(start), at(end)), "designer")
    }

    /// Store that always fails with a fixed error.
    struct FailingStore(CollaboratorError);

    impl CalendarStore for FailingStore {
        fn get_calendar(&self, designer_id: &str) -> std::result::Result<Calendar, CollaboratorError> {
            Ok(Calendar::new(designer_id))
        }

        fn write_booking(
            &self,
            _request: &BookingRequest,
        ) -> std::result::Result<ReservationId, CollaboratorError> {
            Err(self.0.clone())
        }
    }

    struct BrokenNotifier;

    impl NotificationSink for BrokenNotifier {
        fn booking_confirmed(&self, _booking: &Booking) -> std::result::Result<(), CollaboratorError> {
            Err(CollaboratorError::Unreachable("chat down".into()))
        }
    }

    #[test]
    fn test_book_writes_and_notifies() {
        let store = InMemoryCalendarStore::new();
        let notifier = RecordingNotifier::new();
        let committer = BookingCommitter::new(&store).with_notifier(&notifier);

        let booking = committer.book(request("A", 9, 12)).unwrap();
        assert_eq!(booking.designer_id, "A");
        assert_eq!(store.get_calendar("A").unwrap().len(), 1);
        assert_eq!(notifier.sent(), vec![booking]);
    }

    #[test]
    fn test_second_booking_conflicts_and_leaves_calendar() {
        let store = InMemoryCalendarStore::new();
        let committer = BookingCommitter::new(&store);
        committer.book(request("A", 9, 12)).unwrap();
        let before = store.get_calendar("A").unwrap();

        let err = committer.book(request("A", 9, 12)).unwrap_err();
        assert!(matches!(err, EngineError::BookingConflict { ref designer_id } if designer_id == "A"));
        assert_eq!(store.get_calendar("A").unwrap(), before);
        assert_eq!(store.bookings().len(), 1);
    }

    #[test]
    fn test_unreachable_store() {
        let store = FailingStore(CollaboratorError::Unreachable("timeout".into()));
        let err = BookingCommitter::new(&store).book(request("A", 9, 10)).unwrap_err();
        assert!(matches!(err, EngineError::UpstreamUnreachable { ref service, .. } if service == "calendar store"));
    }

    #[test]
    fn test_other_store_failure() {
        let store = FailingStore(CollaboratorError::Failed("500".into()));
        let err = BookingCommitter::new(&store).book(request("A", 9, 10)).unwrap_err();
        assert!(matches!(err, EngineError::Collaborator(CollaboratorError::Failed(_))));
    }

    #[test]
    fn test_notification_failure_keeps_booking() {
        let store = InMemoryCalendarStore::new();
        let committer = BookingCommitter::new(&store).with_notifier(&BrokenNotifier);
        assert!(committer.book(request("A", 9, 10)).is_ok());
        assert_eq!(store.bookings().len(), 1);
    }
}
