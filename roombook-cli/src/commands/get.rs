//! Get command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, print_reservation, Access, GlobalOptions};
use clap::Args;
use roombook::ReservationId;

/// Show one reservation.
#[derive(Args)]
pub struct GetCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let manager = open_manager(global, &config, Access::ReadOnly)?;

        let reservation = manager.get_by_id(self.id)?;
        print_reservation(&reservation)
    }
}
