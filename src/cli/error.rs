//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Args(#[from] clap::Error),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            // --help and --version surface as clap errors on stdout
            CliError::Args(e) if !e.use_stderr() => exitcode::OK,
            CliError::Args(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::InvalidProjectName { .. }) => exitcode::USAGE,
                ApplicationError::Domain(DomainError::InvalidModuleLine { .. })
                | ApplicationError::DescriptorEmpty(_) => exitcode::DATAERR,
                ApplicationError::DescriptorMissing(_) => exitcode::NOINPUT,
                ApplicationError::DirectoryExists(_) => exitcode::CANTCREAT,
                ApplicationError::CommandSpawn { .. } | ApplicationError::CommandFailed { .. } => {
                    exitcode::UNAVAILABLE
                }
                ApplicationError::Template(_) => exitcode::SOFTWARE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::IOERR,
            },
        }
    }
}
