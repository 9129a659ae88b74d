#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roombook
//!
//! A library for managing room reservations with a conflict-checked
//! approval workflow.
//!
//! Reservations are created PENDING, may be edited while PENDING, and move
//! to APPROVED exactly once. Approval is refused when another APPROVED
//! reservation for the same room overlaps the half-open `[start, end)`
//! interval.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`ReservationRequest`] and [`ReservationStatus`]
//! - [`ReservationManager`]: CRUD and approval over a SQLite [`Database`]
//! - [`ReservationStore`]: the storage query contract
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use roombook::{DatabaseConfig, ReservationManager, ReservationRequest};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let mut manager = ReservationManager::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
//!
//! let first = manager.create(&ReservationRequest::new(1, 5, day(1), day(10))).unwrap();
//! let second = manager.create(&ReservationRequest::new(2, 5, day(5), day(12))).unwrap();
//!
//! manager.approve(first.id()).unwrap();
//! assert!(manager.approve(second.id()).unwrap_err().is_conflict());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod init;
pub mod logging;
pub mod manager;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, ReservationStore};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use manager::{ManagerPolicy, ReservationManager};
pub use reservation::{
    Reservation, ReservationDetails, ReservationId, ReservationRequest, ReservationStatus, RoomId,
    UserId, ValidationError,
};
