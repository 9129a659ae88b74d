//! Main entry point for the roombook CLI.
//!
//! This is the command-line interface for the roombook reservation manager.
//! It provides commands for managing room reservations:
//! - `create`, `get`, `update`, `delete`: Reservation records
//! - `approve`: Conflict-checked approval
//! - `list`: List reservations, optionally filtered
//! - `check`: Verify database integrity without writing
//! - `init`: Explicit data directory initialization

use clap::Parser;
use roombook_cli::Cli;

/// Exit code for unusable command-line arguments.
const USAGE_EXIT_CODE: i32 = 4;

fn main() {
    // Help and version requests exit 0; any other parse failure is a usage error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
        Err(e) => e.exit(),
    };

    // Initialize logging based on verbosity
    let _level = roombook::init_logger(cli.verbose, cli.quiet);

    let global = cli.global_options();

    match cli.command.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
