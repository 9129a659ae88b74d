//! Error types for the roombook library.
//!
//! This module provides the error hierarchy for all reservation operations,
//! using `thiserror` for ergonomic error handling. The manager raises the
//! domain failures (`NotFound`, `InvalidArgument`, `InvalidStatus`,
//! `ReservationConflict`); the remaining variants describe storage and
//! configuration faults.

use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus, RoomId};

/// Result type alias for operations that may fail with a roombook error.
///
/// # Examples
///
/// ```
/// use roombook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roombook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller violated a precondition of the operation.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// A description of the violated precondition.
        message: String,
    },

    /// The reservation is not in a state that allows the operation.
    #[error("cannot {operation} reservation {id}: status={status}")]
    InvalidStatus {
        /// The reservation that was targeted.
        id: ReservationId,
        /// The current status of the reservation.
        status: ReservationStatus,
        /// The attempted operation (e.g. "modify", "approve").
        operation: &'static str,
    },

    /// Approving the reservation would overlap an approved booking.
    #[error(
        "cannot approve reservation {id} because of conflict with approved reservation(s) {} in room {room_id}",
        format_ids(.conflicting)
    )]
    ReservationConflict {
        /// The reservation whose approval was rejected.
        id: ReservationId,
        /// The room both reservations target.
        room_id: RoomId,
        /// Ids of the approved reservations that overlap.
        conflicting: Vec<ReservationId>,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {millis}ms")]
    LockTimeout {
        /// How long the connection waited, in milliseconds.
        millis: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

fn format_ids(ids: &[ReservationId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// Payload validation failures are caller errors.
impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::InvalidArgument {
            message: format!("{}: {}", err.field, err.message),
        }
    }
}

impl Error {
    /// Builds a `NotFound` error for a reservation id.
    #[must_use]
    pub fn reservation_not_found(id: ReservationId) -> Self {
        Self::NotFound {
            resource: format!("reservation with id={id}"),
        }
    }

    /// Check if error indicates the reservation does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::Error;
    ///
    /// let err = Error::reservation_not_found(7);
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a caller precondition violation.
    ///
    /// Approval conflicts count as invalid arguments; use
    /// [`Error::is_conflict`] to tell them apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::Error;
    ///
    /// let err = Error::InvalidArgument { message: "id should be empty".into() };
    /// assert!(err.is_invalid_argument());
    /// assert!(!err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::InvalidStatus { .. }
                | Self::ReservationConflict { .. }
        )
    }

    /// Check if error is an approval-time scheduling conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReservationConflict { .. })
    }
}
