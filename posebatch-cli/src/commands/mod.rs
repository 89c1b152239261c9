//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// The default command: estimator + merge over every frame folder.
pub mod run;

/// `posebatch extract`: split one video into numbered frames.
pub mod extract;

/// `posebatch merge`: merge one folder's rendered frames into an mp4.
pub mod merge;
