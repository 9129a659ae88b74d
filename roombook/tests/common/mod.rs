//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use roombook::{
    DatabaseConfig, ManagerPolicy, Reservation, ReservationManager, ReservationRequest,
};
use tempfile::TempDir;

/// A database file in a temporary directory.
///
/// Any number of managers can be opened on the same file, one per thread.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roombook.db");
        Self { _dir: dir, path }
    }

    /// Returns the database file path.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a manager with the default policy.
    pub fn manager(&self) -> ReservationManager {
        self.manager_with(ManagerPolicy::default())
    }

    /// Opens a manager with the given policy.
    pub fn manager_with(&self, policy: ManagerPolicy) -> ReservationManager {
        let db = roombook::Database::open(DatabaseConfig::new(&self.path)).unwrap();
        ReservationManager::new(db, policy)
    }
}

/// Parses an ISO date.
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

/// Builds a create/update payload for `[start, end)`.
pub fn request(user: i64, room: i64, start: &str, end: &str) -> ReservationRequest {
    ReservationRequest::new(user, room, date(start), date(end))
}

/// Creates and approves a reservation.
#[allow(dead_code)]
pub fn approved(manager: &mut ReservationManager, room: i64, start: &str, end: &str) -> Reservation {
    let created = manager.create(&request(1, room, start, end)).unwrap();
    manager.approve(created.id()).unwrap()
}
