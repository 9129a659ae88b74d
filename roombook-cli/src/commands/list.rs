//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{load_configuration, open_manager, parse_status, Access, GlobalOptions};
use clap::{ArgGroup, Args};
use roombook::config::OutputFormat;
use roombook::{Reservation, RoomId, UserId};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "user_id", "room_id", "start_date", "end_date", "status"];

/// List reservations.
#[derive(Args)]
#[command(group(ArgGroup::new("filter").args(["user", "room", "status"])))]
pub struct ListCommand {
    /// Output format: table, json, csv or tsv (default from configuration)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Only reservations requested by this user
    #[arg(long, value_name = "ID")]
    pub user: Option<UserId>,

    /// Only reservations for this room
    #[arg(long, value_name = "ID")]
    pub room: Option<RoomId>,

    /// Only reservations with this status (PENDING or APPROVED)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let format = match self.format {
            Some(ref name) => name.parse().map_err(CliError::InvalidArguments)?,
            None => config.output_format.unwrap_or(OutputFormat::Table),
        };
        let status = self.status.as_deref().map(parse_status).transpose()?;

        let manager = open_manager(global, &config, Access::ReadOnly)?;
        let reservations = if let Some(user) = self.user {
            manager.find_by_user(user)?
        } else if let Some(room) = self.room {
            manager.find_by_room(room)?
        } else if let Some(status) = status {
            manager.find_by_status(status)?
        } else {
            manager.list_all()?
        };
        log::debug!("listing {} reservation(s) as {format}", reservations.len());

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_reservations(&mut handle, &reservations, format)
    }
}

/// Write reservations in the requested format.
fn write_reservations<W: Write>(
    out: &mut W,
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => format_as_table(out, reservations),
        OutputFormat::Json => format_as_json(out, reservations),
        OutputFormat::Csv => format_as_delimited(out, reservations, b','),
        OutputFormat::Tsv => format_as_delimited(out, reservations, b'\t'),
    }
}

fn record(res: &Reservation) -> [String; 6] {
    [
        res.id().to_string(),
        res.user_id().to_string(),
        res.room_id().to_string(),
        res.start_date().to_string(),
        res.end_date().to_string(),
        res.status().to_string(),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table<W: Write>(out: &mut W, reservations: &[Reservation]) -> Result<(), CliError> {
    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for res in reservations {
        writeln!(out, "{}", record(res).join("\t"))?;
    }

    Ok(())
}

/// Format reservations as a JSON array.
fn format_as_json<W: Write>(out: &mut W, reservations: &[Reservation]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, reservations)?;
    writeln!(out)?;
    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited<W: Write>(
    out: &mut W,
    reservations: &[Reservation],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS)?;
    for res in reservations {
        writer.write_record(record(res))?;
    }

    writer.flush()?;
    Ok(())
}
