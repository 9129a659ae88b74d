//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `create`: Create a PENDING reservation
//! - `get`: Show one reservation
//! - `update`: Replace the details of a PENDING reservation
//! - `delete`: Delete a reservation
//! - `approve`: Approve a PENDING reservation after a conflict check
//! - `list`: List reservations, optionally filtered
//! - `check`: Verify database integrity read-only

pub mod approve;
pub mod check;
pub mod create;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod update;

pub use approve::ApproveCommand;
pub use check::CheckCommand;
pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use get::GetCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use update::UpdateCommand;

use crate::error::CliError;
use crate::utils::{parse_date, parse_request_json};
use clap::Args;
use roombook::{ReservationRequest, RoomId, UserId};

/// Reservation fields shared by `create` and `update`.
///
/// Either all four field flags or `--json` must be given.
#[derive(Args, Debug)]
pub struct ReservationArgs {
    /// User requesting the room
    #[arg(long, value_name = "ID", required_unless_present = "json")]
    pub user: Option<UserId>,

    /// Room to reserve
    #[arg(long, value_name = "ID", required_unless_present = "json")]
    pub room: Option<RoomId>,

    /// First day of the reservation (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", required_unless_present = "json")]
    pub start: Option<String>,

    /// Day the reservation ends, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", required_unless_present = "json")]
    pub end: Option<String>,

    /// Full reservation payload as JSON (camelCase fields)
    #[arg(long, value_name = "JSON", conflicts_with_all = ["user", "room", "start", "end"])]
    pub json: Option<String>,
}

impl ReservationArgs {
    /// Build the request payload from the flags.
    pub fn to_request(&self) -> Result<ReservationRequest, CliError> {
        if let Some(ref payload) = self.json {
            return parse_request_json(payload);
        }

        match (self.user, self.room, self.start.as_deref(), self.end.as_deref()) {
            (Some(user), Some(room), Some(start), Some(end)) => Ok(ReservationRequest::new(
                user,
                room,
                parse_date("--start", start)?,
                parse_date("--end", end)?,
            )),
            _ => Err(CliError::InvalidArguments(
                "--user, --room, --start and --end are required without --json".to_string(),
            )),
        }
    }
}
