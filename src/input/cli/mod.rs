//! Command-line input adapter: parses flags into a session and renders one
//! frame to the terminal.

pub mod args;
pub mod run_cli;

pub use args::CliArgs;
pub use run_cli::{CliError, RunCliCommand};
