//! Update command implementation.
//!
//! Only PENDING reservations can be edited. The payload's `id` and `status`
//! are ignored; the positional id selects the record.

use super::ReservationArgs;
use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, print_reservation, Access, GlobalOptions};
use clap::Args;
use roombook::ReservationId;

/// Replace the details of a PENDING reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    #[command(flatten)]
    pub reservation: ReservationArgs,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.reservation.to_request()?;
        if request.id.is_some_and(|id| id != self.id) {
            log::warn!(
                "ignoring payload id {:?}; updating reservation {}",
                request.id,
                self.id
            );
        }

        let config = load_configuration(global)?;
        let mut manager = open_manager(global, &config, Access::ReadWrite)?;

        let updated = manager.update(self.id, &request)?;
        print_reservation(&updated)
    }
}
