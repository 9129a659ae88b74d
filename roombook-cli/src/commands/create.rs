//! Create command implementation.

use super::ReservationArgs;
use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, print_reservation, Access, GlobalOptions};
use clap::Args;

/// Create a PENDING reservation.
#[derive(Args)]
pub struct CreateCommand {
    #[command(flatten)]
    pub reservation: ReservationArgs,
}

impl CreateCommand {
    /// Execute the create command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.reservation.to_request()?;

        let config = load_configuration(global)?;
        let mut manager = open_manager(global, &config, Access::ReadWrite)?;

        let created = manager.create(&request)?;
        print_reservation(&created)
    }
}
