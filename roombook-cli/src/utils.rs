//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: configuration
//! loading, opening the reservation manager, and argument parsing.

use crate::error::CliError;
use chrono::NaiveDate;
use roombook::database::{default_data_dir, DATABASE_FILE_NAME};
use roombook::{
    Config, ConfigBuilder, Database, DatabaseConfig, Reservation, ReservationManager,
    ReservationRequest, ReservationStatus,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

impl GlobalOptions {
    /// Prints a status line to stderr unless `--quiet` is set.
    pub fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` (or `ROOMBOOK_DATA_DIR`) > `~/.roombook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from files in the data directory and the working
/// directory tree, then `ROOMBOOK_*` variables.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Busy timeout from `--busy-timeout`, else `maximum_lock_wait_seconds`.
pub fn busy_timeout(global: &GlobalOptions, config: &Config) -> Duration {
    match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => config.lock_wait(),
    }
}

/// How a command uses the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The command may write.
    ReadWrite,
    /// The command only queries.
    ReadOnly,
}

/// Open the database with configuration.
///
/// Read-only commands open an existing database without write access. When
/// the database is missing and auto-init is allowed, it is created first, so
/// a query against a fresh data directory sees an empty store.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(
    global: &GlobalOptions,
    config: &Config,
    access: Access,
) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);
    let exists = db_path.exists();

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);
    if !exists && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = busy_timeout(global, config);
    let mut db_config = DatabaseConfig::new(&db_path).with_busy_timeout(busy_timeout);
    if access == Access::ReadOnly && exists {
        db_config = db_config.read_only();
    }
    log::debug!(
        "opening {} (busy timeout {}ms, {access:?})",
        db_path.display(),
        busy_timeout.as_millis()
    );

    Ok(Database::open(db_config)?)
}

/// Open the reservation manager with configuration.
///
/// # Errors
///
/// See [`open_database`].
pub fn open_manager(
    global: &GlobalOptions,
    config: &Config,
    access: Access,
) -> Result<ReservationManager, CliError> {
    let db = open_database(global, config, access)?;
    Ok(ReservationManager::new(db, config.manager_policy()))
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        CliError::InvalidArguments(format!("{field}: '{value}' is not a YYYY-MM-DD date ({e})"))
    })
}

/// Parse a reservation status, ignoring case.
pub fn parse_status(value: &str) -> Result<ReservationStatus, CliError> {
    value.parse().map_err(CliError::from)
}

/// Parse a JSON reservation payload.
pub fn parse_request_json(payload: &str) -> Result<ReservationRequest, CliError> {
    serde_json::from_str(payload)
        .map_err(|e| CliError::InvalidArguments(format!("invalid reservation JSON: {e}")))
}

/// Write a reservation to stdout as pretty JSON.
pub fn print_reservation(reservation: &Reservation) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, reservation)?;
    writeln!(handle)?;
    Ok(())
}
