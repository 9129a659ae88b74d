//! Transaction management utilities.
//!
//! Every mutating reservation operation runs inside one `BEGIN IMMEDIATE`
//! transaction. IMMEDIATE acquires the database write lock up front, so a
//! read-check-write sequence cannot interleave with another writer.

use std::time::Duration;

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

/// Converts a lock-contention failure into [`Error::LockTimeout`].
///
/// Any other `SQLite` error is passed through as [`Error::Database`].
pub(crate) fn map_lock_error(err: rusqlite::Error, busy_timeout: Duration) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                millis: u64::try_from(busy_timeout.as_millis()).unwrap_or(u64::MAX),
            }
        }
        other => Error::Database(other),
    }
}

impl Database {
    /// Begins an IMMEDIATE transaction.
    ///
    /// The transaction rolls back when dropped without an explicit commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the configured busy timeout, or a database error if the
    /// transaction cannot be started.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let busy_timeout = self.config().busy_timeout;
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| map_lock_error(e, busy_timeout))
    }

    /// Runs `operation` inside an IMMEDIATE transaction.
    ///
    /// The transaction is committed when `operation` returns `Ok` and rolled
    /// back when it returns `Err`, so a failed operation leaves no trace.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `operation`, or a lock/database error
    /// from beginning or committing the transaction.
    pub fn with_transaction<T, F>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let busy_timeout = self.config().busy_timeout;
        let tx = self.begin_transaction()?;

        match operation(&tx) {
            Ok(value) => {
                tx.commit().map_err(|e| map_lock_error(e, busy_timeout))?;
                Ok(value)
            }
            Err(err) => {
                log::debug!("rolling back transaction: {err}");
                // Dropping the transaction rolls it back
                drop(tx);
                Err(err)
            }
        }
    }
}
