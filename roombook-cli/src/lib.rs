//! Command-line front end for the roombook reservation library.
//!
//! The binary in `main.rs` parses [`Cli`] and dispatches to the command
//! implementations in [`commands`].

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
pub use error::CliError;
