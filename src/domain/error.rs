//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid user-supplied values.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid module declaration {line:?}: expected `module <path>`")]
    InvalidModuleLine { line: String },
}
