//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, Access, GlobalOptions};
use clap::Args;
use roombook::ReservationId;

/// Delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut manager = open_manager(global, &config, Access::ReadWrite)?;

        manager.delete(self.id)?;
        global.status(&format!("Deleted reservation {}", self.id));

        Ok(())
    }
}
