//! CLI module for bidscope.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//! - Running a search with streamed terminal output
//!
//! # Usage
//!
//! The dispatcher handles informational flags before any runtime work starts:
//!
//! ```ignore
//! use bidscope::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args())?;
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! // CliCommand::Search continues into the async search
//! ```

pub mod args;
pub mod search;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, SearchArgs};
pub use search::run_search;
pub use version::{handle_help_command, handle_version_command, VERSION};

/// Run an informational CLI command if applicable.
///
/// Returns `true` when the command was fully handled here, `false` for
/// `Search`, which needs the async client.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            handle_version_command();
            true
        }
        CliCommand::Help => {
            handle_help_command();
            true
        }
        CliCommand::Search(_) => false,
    }
}
