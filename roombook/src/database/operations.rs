//! Reservation store operations.
//!
//! The [`ReservationStore`] trait is the query contract the manager relies
//! on. It is implemented for [`rusqlite::Connection`], so the same calls work
//! on a plain connection for reads and on a `Transaction` (which derefs to a
//! connection) for the mutating paths.

use chrono::{Datelike, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{
    Reservation, ReservationDetails, ReservationId, ReservationStatus, RoomId, UserId,
};

use super::connection::Database;
use super::schema::{
    DELETE_RESERVATION, INSERT_RESERVATION, RESERVATION_COLUMNS, UPSERT_RESERVATION,
};

/// Persistence contract for reservations.
///
/// Every query returns records ordered by id. Lookups on keys that match
/// nothing return an empty vector rather than an error.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore {
    /// Loads a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Persists a reservation and returns the stored record.
    ///
    /// A fresh id is assigned when `id` is `None`; otherwise the row with that
    /// id is inserted or replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(
        &self,
        id: Option<ReservationId>,
        details: &ReservationDetails,
        status: ReservationStatus,
    ) -> Result<Reservation>;

    /// Returns true if a reservation with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn exists_by_id(&self, id: ReservationId) -> Result<bool>;

    /// Deletes a reservation, returning whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_by_id(&self, id: ReservationId) -> Result<bool>;

    /// Lists every reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_all(&self) -> Result<Vec<Reservation>>;

    /// Lists reservations requested by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>>;

    /// Lists reservations for `room_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_room_id(&self, room_id: RoomId) -> Result<Vec<Reservation>>;

    /// Lists reservations in `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>>;

    /// Lists APPROVED reservations for `room_id` overlapping `[start, end)`.
    ///
    /// The reservation with id `exclude` is left out, so a persisted record is
    /// never reported as conflicting with itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_conflicting(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>>;
}

/// Day number stored for `date`.
///
/// Integer order of day numbers is calendar order, including years past 9999
/// and before year 1.
fn to_day(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn from_day(idx: usize, day: i32) -> rusqlite::Result<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(day).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("day number {day} is outside the supported calendar").into(),
        )
    })
}

/// Deserializes a reservation from a row selected with `RESERVATION_COLUMNS`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: ReservationId = row.get(0)?;
    let user_id: UserId = row.get(1)?;
    let room_id: RoomId = row.get(2)?;
    let start: i32 = row.get(3)?;
    let end: i32 = row.get(4)?;
    let status: String = row.get(5)?;

    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    let details = ReservationDetails::new(
        user_id,
        room_id,
        from_day(3, start)?,
        from_day(4, end)?,
    );
    Ok(Reservation::new(id, details, status))
}

fn select(conn: &Connection, filter: &str, params: impl rusqlite::Params) -> Result<Vec<Reservation>> {
    let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations {filter} ORDER BY id");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params, row_to_reservation)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

impl ReservationStore for Connection {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
        let mut stmt = self.prepare_cached(&sql)?;
        Ok(stmt.query_row(params![id], row_to_reservation).optional()?)
    }

    fn save(
        &self,
        id: Option<ReservationId>,
        details: &ReservationDetails,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let start = to_day(details.start_date);
        let end = to_day(details.end_date);

        let id = match id {
            Some(id) => {
                self.execute(
                    UPSERT_RESERVATION,
                    params![id, details.user_id, details.room_id, start, end, status.as_str()],
                )?;
                id
            }
            None => {
                self.execute(
                    INSERT_RESERVATION,
                    params![details.user_id, details.room_id, start, end, status.as_str()],
                )?;
                self.last_insert_rowid()
            }
        };

        Ok(Reservation::new(id, details.clone(), status))
    }

    fn exists_by_id(&self, id: ReservationId) -> Result<bool> {
        let found: bool = self.query_row(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    fn delete_by_id(&self, id: ReservationId) -> Result<bool> {
        let rows = self.execute(DELETE_RESERVATION, params![id])?;
        Ok(rows > 0)
    }

    fn find_all(&self) -> Result<Vec<Reservation>> {
        select(self, "", [])
    }

    fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>> {
        select(self, "WHERE user_id = ?1", params![user_id])
    }

    fn find_by_room_id(&self, room_id: RoomId) -> Result<Vec<Reservation>> {
        select(self, "WHERE room_id = ?1", params![room_id])
    }

    fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        select(self, "WHERE status = ?1", params![status.as_str()])
    }

    fn find_conflicting(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        select(
            self,
            "WHERE room_id = ?1 AND status = 'APPROVED' \
             AND start_day < ?3 AND end_day > ?2 \
             AND (?4 IS NULL OR id != ?4)",
            params![room_id, to_day(start), to_day(end), exclude],
        )
    }
}

impl Database {
    /// Verifies database integrity.
    ///
    /// Runs `SQLite`'s integrity check pragma.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/roombook.db");
    /// let db = Database::open(config).unwrap();
    ///
    /// db.verify_integrity().unwrap();
    /// ```
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, january, save_approved, save_pending};

    #[test]
    fn test_save_assigns_fresh_ids() {
        let db = create_test_database();
        let conn = db.connection();

        let first = save_pending(conn, 1, 5, 1, 10);
        let second = save_pending(conn, 2, 5, 3, 4);

        assert_ne!(first.id(), second.id());
        assert_eq!(first.status(), ReservationStatus::Pending);
    }

    #[test]
    fn test_find_by_id_round_trips_fields() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);

        let loaded = conn.find_by_id(saved.id()).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.start_date(), january(1));
        assert_eq!(loaded.end_date(), january(10));
    }

    #[test]
    fn test_find_by_id_missing() {
        let db = create_test_database();
        assert!(db.connection().find_by_id(42).unwrap().is_none());
    }

    #[test]
    fn test_save_with_id_replaces_row() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);

        let moved = ReservationDetails::new(1, 6, january(2), january(3));
        conn.save(Some(saved.id()), &moved, ReservationStatus::Approved)
            .unwrap();

        let loaded = conn.find_by_id(saved.id()).unwrap().unwrap();
        assert_eq!(loaded.room_id(), 6);
        assert_eq!(loaded.status(), ReservationStatus::Approved);
        assert_eq!(conn.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_exists_and_delete() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);

        assert!(conn.exists_by_id(saved.id()).unwrap());
        assert!(conn.delete_by_id(saved.id()).unwrap());
        assert!(!conn.exists_by_id(saved.id()).unwrap());
        assert!(!conn.delete_by_id(saved.id()).unwrap());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let db = create_test_database();
        let conn = db.connection();
        let first = save_pending(conn, 1, 5, 1, 10);
        conn.delete_by_id(first.id()).unwrap();

        let second = save_pending(conn, 1, 5, 1, 10);
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_secondary_lookups() {
        let db = create_test_database();
        let conn = db.connection();
        let a = save_pending(conn, 1, 5, 1, 10);
        let b = save_approved(conn, 1, 6, 1, 10);
        let c = save_pending(conn, 2, 5, 12, 14);

        assert_eq!(conn.find_all().unwrap(), vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(conn.find_by_user_id(1).unwrap(), vec![a.clone(), b.clone()]);
        assert_eq!(conn.find_by_room_id(5).unwrap(), vec![a.clone(), c.clone()]);
        assert_eq!(
            conn.find_by_status(ReservationStatus::Pending).unwrap(),
            vec![a, c]
        );
        assert_eq!(
            conn.find_by_status(ReservationStatus::Approved).unwrap(),
            vec![b]
        );
        assert!(conn.find_by_user_id(99).unwrap().is_empty());
        assert!(conn.find_by_room_id(99).unwrap().is_empty());
    }

    #[test]
    fn test_find_conflicting_only_reports_approved_overlaps() {
        let db = create_test_database();
        let conn = db.connection();
        let approved = save_approved(conn, 1, 5, 1, 10);
        save_pending(conn, 2, 5, 1, 10);
        save_approved(conn, 3, 6, 1, 10);

        let hits = conn
            .find_conflicting(5, january(5), january(12), None)
            .unwrap();
        assert_eq!(hits, vec![approved]);
    }

    #[test]
    fn test_find_conflicting_touching_endpoints() {
        let db = create_test_database();
        let conn = db.connection();
        save_approved(conn, 1, 5, 1, 10);

        assert!(conn
            .find_conflicting(5, january(10), january(15), None)
            .unwrap()
            .is_empty());
        assert!(conn
            .find_conflicting(5, january(1).pred_opt().unwrap(), january(1), None)
            .unwrap()
            .is_empty());
        assert_eq!(
            conn.find_conflicting(5, january(9), january(15), None)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_find_conflicting_excludes_self() {
        let db = create_test_database();
        let conn = db.connection();
        let approved = save_approved(conn, 1, 5, 1, 10);

        let hits = conn
            .find_conflicting(5, january(1), january(10), Some(approved.id()))
            .unwrap();
        assert!(hits.is_empty());

        let hits = conn
            .find_conflicting(5, january(1), january(10), Some(approved.id() + 1))
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_conflicts_across_year_ten_thousand() {
        let db = create_test_database();
        let conn = db.connection();
        let long = ReservationDetails::new(
            1,
            5,
            january(1),
            NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap(),
        );
        let long = conn.save(None, &long, ReservationStatus::Approved).unwrap();

        let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let hits = conn.find_conflicting(5, june(1), june(10), None).unwrap();
        assert_eq!(hits, vec![long.clone()]);

        let loaded = conn.find_by_id(long.id()).unwrap().unwrap();
        assert_eq!(loaded.end_date(), NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap());
    }

    #[test]
    fn test_conflicts_before_year_one() {
        let db = create_test_database();
        let conn = db.connection();
        let ancient = ReservationDetails::new(
            1,
            5,
            NaiveDate::from_ymd_opt(-100, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(-50, 1, 1).unwrap(),
        );
        let ancient = conn.save(None, &ancient, ReservationStatus::Approved).unwrap();

        let inside = conn
            .find_conflicting(
                5,
                NaiveDate::from_ymd_opt(-80, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(-80, 3, 5).unwrap(),
                None,
            )
            .unwrap();
        assert_eq!(inside, vec![ancient]);

        let after = conn
            .find_conflicting(5, january(1), january(10), None)
            .unwrap();
        assert!(after.is_empty());
    }

    #[test]
    fn test_dates_are_stored_as_day_numbers() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);

        let (kind, day): (String, i32) = conn
            .query_row(
                "SELECT typeof(start_day), start_day FROM reservations WHERE id = ?1",
                params![saved.id()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(kind, "integer");
        assert_eq!(day, january(1).num_days_from_ce());
    }

    #[test]
    fn test_corrupt_date_is_reported() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);
        conn.execute(
            "UPDATE reservations SET start_day = 'not-a-date' WHERE id = ?1",
            params![saved.id()],
        )
        .unwrap();

        let err = conn.find_by_id(saved.id()).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_out_of_range_day_is_reported() {
        let db = create_test_database();
        let conn = db.connection();
        let saved = save_pending(conn, 1, 5, 1, 10);
        conn.execute(
            "UPDATE reservations SET end_day = ?1 WHERE id = ?2",
            params![i32::MAX, saved.id()],
        )
        .unwrap();

        let err = conn.find_by_id(saved.id()).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
