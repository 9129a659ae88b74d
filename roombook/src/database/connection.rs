//! Opening the reservation database.
//!
//! A writable open creates the file, switches it to WAL and lays down the
//! reservation schema on first use. A read-only open never creates anything
//! and only checks that the file carries a schema this build understands.

use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::schema::{
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, METADATA_TABLE_EXISTS, SCHEMA_STATEMENTS,
    SELECT_SCHEMA_VERSION,
};
use super::transaction::map_lock_error;

/// An open reservation database.
///
/// Holds one `SQLite` connection. Use one `Database` per thread; concurrent
/// writers coordinate through `SQLite` locking.
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the database described by `config`.
    ///
    /// The busy timeout is installed before anything else touches the file,
    /// so a fresh open waits for a concurrent writer instead of failing.
    ///
    /// # Errors
    ///
    /// - [`Error::DataDirectoryNotFound`] for a read-only open of a missing file
    /// - [`Error::UnsupportedSchemaVersion`] if the file was written by another schema
    /// - [`Error::LockTimeout`] if schema setup cannot get the write lock in time
    /// - [`Error::Io`] if the parent directory cannot be created
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
    /// assert!(!db.config().read_only);
    /// ```
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let mut conn = if config.read_only {
            if !config.path.exists() {
                return Err(Error::DataDirectoryNotFound {
                    path: config.path.clone(),
                });
            }
            Connection::open_with_flags(
                &config.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open_with_flags(
                &config.path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        };

        conn.busy_timeout(config.busy_timeout)?;

        if config.read_only {
            check_version(read_version(&conn)?)?;
        } else {
            let _: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(|e| map_lock_error(e, config.busy_timeout))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
            ensure_schema(&mut conn, config.busy_timeout)?;
        }

        log::debug!(
            "opened reservation database at {}{}",
            config.path.display(),
            if config.read_only { " (read-only)" } else { "" }
        );
        Ok(Self { conn, config })
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the underlying `SQLite` connection.
    ///
    /// [`ReservationStore`](super::ReservationStore) is implemented for
    /// `Connection`, so this is the entry point for read-only queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the underlying connection mutably.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

/// Reads the stored schema version, or 0 for a file without one.
fn read_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(METADATA_TABLE_EXISTS, [], |row| row.get(0))?;
    if !has_metadata {
        return Ok(0);
    }

    let value: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;
    match value {
        None => Ok(0),
        Some(text) => text.parse().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema version '{text}' is not a number"),
        }),
    }
}

fn check_version(found: i32) -> Result<()> {
    if found == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        })
    }
}

/// Creates the schema on an empty file, or checks the stored version.
///
/// Creation runs under an IMMEDIATE transaction and re-reads the version once
/// the lock is held, so two processes opening a fresh file create it once.
fn ensure_schema(conn: &mut Connection, busy_timeout: Duration) -> Result<()> {
    if read_version(conn)? == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| map_lock_error(e, busy_timeout))?;

    match read_version(&tx)? {
        0 => {
            for statement in SCHEMA_STATEMENTS {
                tx.execute(statement, [])?;
            }
            tx.execute(
                INSERT_SCHEMA_VERSION,
                params![CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            log::info!("created reservation schema v{CURRENT_SCHEMA_VERSION}");
        }
        found => check_version(found)?,
    }

    tx.commit().map_err(|e| map_lock_error(e, busy_timeout))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ReservationStore;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_open_creates_schema_in_wal_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("rooms.db");

        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let conn = db.connection();
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
        assert_eq!(read_version(conn).unwrap(), CURRENT_SCHEMA_VERSION);
        assert!(conn.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rooms.db");
        {
            let db = Database::open(DatabaseConfig::new(&path)).unwrap();
            let details = crate::ReservationDetails::new(
                1,
                5,
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            );
            db.connection()
                .save(None, &details, crate::ReservationStatus::Pending)
                .unwrap();
        }

        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert_eq!(db.connection().find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_other_schema_version_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rooms.db");
        {
            let db = Database::open(DatabaseConfig::new(&path)).unwrap();
            db.connection()
                .execute(INSERT_SCHEMA_VERSION, params!["1"])
                .unwrap();
        }

        let err = Database::open(DatabaseConfig::new(&path)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedSchemaVersion {
                expected: CURRENT_SCHEMA_VERSION,
                found: 1,
            }
        ));

        let err = Database::open(DatabaseConfig::new(&path).read_only()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSchemaVersion { found: 1, .. }));
    }

    #[test]
    fn test_read_only_open_of_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rooms.db");

        let err = Database::open(DatabaseConfig::new(&path).read_only()).unwrap_err();
        assert!(matches!(err, Error::DataDirectoryNotFound { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_read_only_open_refuses_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rooms.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        assert!(db.config().read_only);
        assert!(db.connection().find_all().unwrap().is_empty());
        assert!(db
            .connection()
            .execute("DELETE FROM reservations", [])
            .is_err());
    }

    #[test]
    fn test_concurrent_first_opens_share_one_schema() {
        let dir = tempdir().unwrap();
        let path = Arc::new(dir.path().join("rooms.db"));
        {
            // An empty WAL file, so the race is over schema creation alone
            let conn = Connection::open(path.as_path()).unwrap();
            let _: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .unwrap();
        }
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let path = Arc::clone(&path);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    Database::open(
                        DatabaseConfig::new(path.as_path())
                            .with_busy_timeout(Duration::from_secs(10)),
                    )
                    .map(|_| ())
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let db = Database::open(DatabaseConfig::new(path.as_path())).unwrap();
        let versions: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM metadata WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(versions, 1);
    }
}
