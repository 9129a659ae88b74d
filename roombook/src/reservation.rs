//! Reservation types for tracking room bookings.
//!
//! This module provides the persisted [`Reservation`] record, the
//! [`ReservationRequest`] payload accepted by create and update, and the
//! closed [`ReservationStatus`] set.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Store-assigned identifier of a reservation.
pub type ReservationId = i64;
/// Identifier of the user requesting a reservation.
pub type UserId = i64;
/// Identifier of the room being reserved.
pub type RoomId = i64;

/// Lifecycle status of a reservation.
///
/// A reservation starts out `Pending` and moves to `Approved` exactly once.
///
/// # Examples
///
/// ```
/// use roombook::ReservationStatus;
///
/// let status: ReservationStatus = "APPROVED".parse().unwrap();
/// assert_eq!(status, ReservationStatus::Approved);
/// assert_eq!(status.to_string(), "APPROVED");
/// assert!("CANCELLED".parse::<ReservationStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Awaiting approval; the only mutable state.
    Pending,
    /// Approved and conflict-checked; final.
    Approved,
}

impl ReservationStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 2] = [Self::Pending, Self::Approved];

    /// Returns the canonical (database and wire) spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    /// Parses a status, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidArgument {
                message: format!("unknown reservation status '{s}' (expected PENDING or APPROVED)"),
            })
    }
}

/// The caller-controlled part of a reservation: who books which room, when.
///
/// The interval is half-open: `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    /// The requesting user.
    pub user_id: UserId,
    /// The reserved room.
    pub room_id: RoomId,
    /// First day of the reservation (inclusive).
    pub start_date: NaiveDate,
    /// Day the reservation ends (exclusive).
    pub end_date: NaiveDate,
}

impl ReservationDetails {
    /// Creates reservation details.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            room_id,
            start_date,
            end_date,
        }
    }

    /// Checks that the interval is non-empty (`start_date < end_date`).
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming `end_date` when the end does not
    /// come strictly after the start.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roombook::ReservationDetails;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// assert!(ReservationDetails::new(1, 5, day(1), day(10)).check_date_order().is_ok());
    /// assert!(ReservationDetails::new(1, 5, day(10), day(10)).check_date_order().is_err());
    /// ```
    pub fn check_date_order(&self) -> Result<(), ValidationError> {
        if self.start_date < self.end_date {
            Ok(())
        } else {
            Err(ValidationError {
                field: "endDate".into(),
                message: format!(
                    "end date {} must be after start date {}",
                    self.end_date, self.start_date
                ),
            })
        }
    }

    /// Returns true when `[start_date, end_date)` intersects `[start, end)`.
    ///
    /// Touching endpoints do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roombook::ReservationDetails;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// let booked = ReservationDetails::new(1, 5, day(1), day(10));
    /// assert!(booked.overlaps(day(5), day(12)));
    /// assert!(!booked.overlaps(day(10), day(15)));
    /// ```
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && self.end_date > start
    }
}

/// A persisted reservation.
///
/// Records are only produced by the store, so `id` and `status` are always
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: ReservationId,
    #[serde(flatten)]
    details: ReservationDetails,
    status: ReservationStatus,
}

impl Reservation {
    pub(crate) const fn new(
        id: ReservationId,
        details: ReservationDetails,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id,
            details,
            status,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the caller-controlled details.
    #[must_use]
    pub const fn details(&self) -> &ReservationDetails {
        &self.details
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.details.user_id
    }

    /// Returns the reserved room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.details.room_id
    }

    /// Returns the first day (inclusive).
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.details.start_date
    }

    /// Returns the end day (exclusive).
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.details.end_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true while the reservation can still be changed or approved.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }
}

/// Payload for creating or updating a reservation.
///
/// Mirrors the wire shape of a reservation but leaves `id` and `status`
/// optional. Create rejects a payload that sets either; update ignores them.
///
/// # Examples
///
/// ```
/// use roombook::ReservationRequest;
///
/// let json = r#"{"userId":1,"roomId":5,"startDate":"2024-01-01","endDate":"2024-01-10"}"#;
/// let request: ReservationRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.id, None);
/// assert_eq!(request.status, None);
/// assert_eq!(request.details.room_id, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    /// Must be unset on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReservationId>,
    /// The requested booking.
    #[serde(flatten)]
    pub details: ReservationDetails,
    /// Must be unset on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

impl ReservationRequest {
    /// Creates a payload with `id` and `status` unset.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            details: ReservationDetails::new(user_id, room_id, start_date, end_date),
            status: None,
        }
    }

    /// Sets the id field.
    #[must_use]
    pub const fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the status field.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;
