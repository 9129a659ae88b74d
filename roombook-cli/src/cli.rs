//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ApproveCommand, CheckCommand, CreateCommand, DeleteCommand, GetCommand, InitCommand,
    ListCommand, UpdateCommand,
};
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Longest accepted `--busy-timeout`, matching the configuration limit.
const MAX_BUSY_TIMEOUT: i64 = 3600;

/// Command-line tool for managing room reservations.
#[derive(Parser)]
#[command(name = "roombook")]
#[command(version, about = "Manage room reservations and approvals", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds, 1 to 3600)
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "ROOMBOOK_BUSY_TIMEOUT",
        value_parser = clap::value_parser!(u32).range(1..=MAX_BUSY_TIMEOUT)
    )]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "ROOMBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Global options shared by every command.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            disable_autoinit: self.disable_autoinit,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Create a PENDING reservation
    Create(CreateCommand),

    /// Show one reservation
    Get(GetCommand),

    /// Replace the details of a PENDING reservation
    Update(UpdateCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// Approve a PENDING reservation
    Approve(ApproveCommand),

    /// List reservations
    List(ListCommand),

    /// Verify database integrity without modifying it
    Check(CheckCommand),
}

impl Command {
    /// Run the selected command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Command::Init(cmd) => cmd.execute(global),
            Command::Create(cmd) => cmd.execute(global),
            Command::Get(cmd) => cmd.execute(global),
            Command::Update(cmd) => cmd.execute(global),
            Command::Delete(cmd) => cmd.execute(global),
            Command::Approve(cmd) => cmd.execute(global),
            Command::List(cmd) => cmd.execute(global),
            Command::Check(cmd) => cmd.execute(global),
        }
    }
}
