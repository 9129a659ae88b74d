//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and statements
//! used by the reservation store.

/// Current schema version for the database.
///
/// Version 1 stored dates as text; version 2 stores day numbers. Files of any
/// other version are refused rather than rewritten.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Ids are assigned by SQLite and never reused. Dates are stored as days
/// since 0001-01-01 (`NaiveDate::num_days_from_ce`), so integer comparison
/// is calendar order for every year chrono can represent.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        room_id INTEGER NOT NULL,
        start_day INTEGER NOT NULL,
        end_day INTEGER NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'APPROVED'))
    )";

/// Index backing lookups by user.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// Index backing lookups by room.
pub const CREATE_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// Index backing lookups by status.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// Composite index backing the conflict query (room, status, start).
pub const CREATE_CONFLICT_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_room_status \
     ON reservations(room_id, status, start_day)";

/// Tables and indices of a fresh database, in creation order.
pub const SCHEMA_STATEMENTS: [&str; 6] = [
    CREATE_METADATA_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_USER_INDEX,
    CREATE_ROOM_INDEX,
    CREATE_STATUS_INDEX,
    CREATE_CONFLICT_INDEX,
];

/// Whether the metadata table exists yet.
pub const METADATA_TABLE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query, in `row_to_reservation` order.
pub const RESERVATION_COLUMNS: &str = "id, user_id, room_id, start_day, end_day, status";

/// SQL statement to insert a reservation with a fresh id.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (user_id, room_id, start_day, end_day, status)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

/// SQL statement to insert or replace a reservation with a known id.
pub const UPSERT_RESERVATION: &str = r"
    INSERT INTO reservations (id, user_id, room_id, start_day, end_day, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id) DO UPDATE SET
        user_id = excluded.user_id,
        room_id = excluded.room_id,
        start_day = excluded.start_day,
        end_day = excluded.end_day,
        status = excluded.status
";

/// SQL statement to delete a reservation by id.
pub const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?1";
