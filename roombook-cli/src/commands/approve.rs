//! Approve command implementation.
//!
//! Approval is refused (exit code 9) when an APPROVED reservation for the
//! same room overlaps the requested dates.

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, print_reservation, Access, GlobalOptions};
use clap::Args;
use roombook::ReservationId;

/// Approve a PENDING reservation.
#[derive(Args)]
pub struct ApproveCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl ApproveCommand {
    /// Execute the approve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut manager = open_manager(global, &config, Access::ReadWrite)?;

        let approved = manager.approve(self.id)?;
        print_reservation(&approved)
    }
}
