//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{ArtifactFlags, Cli, Commands, ConfigCommands};
pub use commands::{dispatch, execute_command};
pub use error::{CliError, CliResult};
