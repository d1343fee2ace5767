//! Booking (reservation) model.
//!
//! A booking is created once by the booking committer and owned by the
//! calendar store afterwards. The engine never mutates or deletes one.

use serde::{Deserialize, Serialize};

use super::{BookedInterval, TimeSlot};

/// Identifier the calendar store assigns to a written booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub String);

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata written alongside a booked interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingMetadata {
    /// Originating task.
    pub task_id: String,
    /// Role the designer fills (e.g., "designer").
    pub role_tag: String,
    /// Parent of the originating task, for traceability.
    pub parent_task_id: Option<String>,
    /// Calendar entry title.
    pub label: String,
}

/// A write request for the calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub designer_id: String,
    pub slot: TimeSlot,
    pub metadata: BookingMetadata,
}

impl BookingRequest {
    pub fn new(
        designer_id: impl Into<String>,
        task_id: impl Into<String>,
        slot: TimeSlot,
        role_tag: impl Into<String>,
    ) -> Self {
        let task_id = task_id.into();
        let role_tag = role_tag.into();
        Self {
            designer_id: designer_id.into(),
            slot,
            metadata: BookingMetadata {
                label: format!("{task_id} ({role_tag})"),
                task_id,
                role_tag,
                parent_task_id: None,
            },
        }
    }

    pub fn with_parent(mut self, parent_task_id: Option<String>) -> Self {
        self.metadata.parent_task_id = parent_task_id;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata.label = label.into();
        self
    }
}

/// A committed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reservation_id: ReservationId,
    pub designer_id: String,
    pub slot: TimeSlot,
    pub metadata: BookingMetadata,
}

impl Booking {
    pub fn from_request(reservation_id: ReservationId, request: BookingRequest) -> Self {
        Self {
            reservation_id,
            designer_id: request.designer_id,
            slot: request.slot,
            metadata: request.metadata,
        }
    }

    #[inline]
    pub fn task_id(&self) -> &str {
        &self.metadata.task_id
    }

    /// The calendar entry this booking adds.
    pub fn as_interval(&self) -> BookedInterval {
        BookedInterval {
            resource_id: self.designer_id.clone(),
            slot: self.slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn slot() -> TimeSlot {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        TimeSlot::starting_at(start, Duration::hours(3))
    }

    #[test]
    fn test_request_defaults() {
        let req = BookingRequest::new("D1", "T1", slot(), "designer");
        assert_eq!(req.metadata.label, "T1 (designer)");
        assert_eq!(req.metadata.role_tag, "designer");
        assert!(req.metadata.parent_task_id.is_none());
    }

    #[test]
    fn test_booking_from_request() {
        let req = BookingRequest::new("D1", "T1", slot(), "designer")
            .with_parent(Some("P7".into()))
            .with_label("Flyer (designer)");
        let booking = Booking::from_request(ReservationId("r-1".into()), req);

        assert_eq!(booking.task_id(), "T1");
        assert_eq!(booking.metadata.parent_task_id.as_deref(), Some("P7"));
        assert_eq!(booking.as_interval().resource_id, "D1");
        assert_eq!(booking.as_interval().slot, slot());
        assert_eq!(booking.reservation_id.to_string(), "r-1");
    }
}
