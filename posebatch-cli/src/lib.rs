// posebatch-cli/src/lib.rs
//
// Library portion of the Posebatch CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ExtractArgs, MergeArgs, RunArgs};
pub use commands::extract::run_extract;
pub use commands::merge::run_merge;
pub use commands::run::run_batch_command;
pub use error::CliResult;

/// Dispatches a parsed command line.
pub fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Some(Commands::Extract(args)) => run_extract(args, cli.verbose),
        Some(Commands::Merge(args)) => run_merge(args, cli.verbose),
        None => run_batch_command(cli.run, cli.verbose),
    }
}
