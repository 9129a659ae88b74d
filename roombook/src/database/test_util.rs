//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig, ReservationStore};
use crate::reservation::{Reservation, ReservationDetails, ReservationStatus};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Returns the given day of January 2024.
///
/// # Panics
///
/// Panics if `day` is not a valid January day.
#[must_use]
pub fn january(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn save_with_status(
    conn: &Connection,
    user: i64,
    room: i64,
    start: u32,
    end: u32,
    status: ReservationStatus,
) -> Reservation {
    let details = ReservationDetails::new(user, room, january(start), january(end));
    conn.save(None, &details, status).unwrap()
}

/// Stores a PENDING reservation spanning January `start..end`.
pub fn save_pending(conn: &Connection, user: i64, room: i64, start: u32, end: u32) -> Reservation {
    save_with_status(conn, user, room, start, end, ReservationStatus::Pending)
}

/// Stores an APPROVED reservation spanning January `start..end`.
pub fn save_approved(conn: &Connection, user: i64, room: i64, start: u32, end: u32) -> Reservation {
    save_with_status(conn, user, room, start, end, ReservationStatus::Approved)
}
