//! Check command implementation.
//!
//! Opens the database read-only, runs `SQLite`'s integrity check and reports
//! how many reservations are stored in each state.

use crate::error::CliError;
use crate::utils::{busy_timeout, load_configuration, resolve_data_dir, GlobalOptions};
use clap::Args;
use roombook::database::{ReservationStore, CURRENT_SCHEMA_VERSION, DATABASE_FILE_NAME};
use roombook::{Database, DatabaseConfig, ReservationStatus};

/// Verify the database without modifying it.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

        let db = Database::open(
            DatabaseConfig::new(&db_path)
                .with_busy_timeout(busy_timeout(global, &config))
                .read_only(),
        )?;

        db.verify_integrity()?;

        let conn = db.connection();
        let pending = conn.find_by_status(ReservationStatus::Pending)?.len();
        let approved = conn.find_by_status(ReservationStatus::Approved)?.len();
        log::debug!("integrity check passed for {}", db_path.display());

        println!(
            "ok: {} (schema v{CURRENT_SCHEMA_VERSION}, {pending} pending, {approved} approved)",
            db_path.display()
        );
        Ok(())
    }
}
