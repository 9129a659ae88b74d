//! Database layer for persistent storage of room reservations.
//!
//! This module provides a SQLite-based storage layer: opening with schema
//! setup, the [`ReservationStore`] query contract and explicit IMMEDIATE
//! transactions.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use roombook::database::{Database, DatabaseConfig, ReservationStore};
//! use roombook::{ReservationDetails, ReservationStatus};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let details = ReservationDetails::new(1, 5, day(1), day(10));
//! let saved = db
//!     .with_transaction(|tx| tx.save(None, &details, ReservationStatus::Pending))
//!     .unwrap();
//!
//! for reservation in db.connection().find_by_room_id(5).unwrap() {
//!     println!("{reservation:?}");
//! }
//! # let _ = saved;
//! ```

mod config;
mod connection;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_NAME, DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub use operations::ReservationStore;
pub use schema::CURRENT_SCHEMA_VERSION;

#[cfg(test)]
pub(crate) use operations::MockReservationStore;
