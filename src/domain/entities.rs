//! Domain entities: core data structures

use std::fmt;
use std::path::PathBuf;

use crate::domain::DomainError;

/// Name of the project being scaffolded.
///
/// Used both as a directory name and as the `PRJ-NAME` substitution value,
/// so it must be a single safe path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a raw project name.
    ///
    /// Rejects empty names, surrounding whitespace, `.` and `..`, path
    /// separators and control characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if raw.trim() != raw {
            return Err(invalid("name must not start or end with whitespace"));
        }
        if raw == "." || raw == ".." {
            return Err(invalid("name must not be a relative path component"));
        }
        if raw.contains(['/', '\\']) {
            return Err(invalid("name must not contain path separators"));
        }
        if raw.chars().any(char::is_control) {
            return Err(invalid("name must not contain control characters"));
        }

        Ok(Self(raw.to_string()))
    }

    /// Derive the project name from a module declaration line.
    ///
    /// `module github.com/acme/widget` yields `widget`: the final path segment
    /// of the second whitespace-separated field.
    pub fn from_module_line(line: &str) -> Result<Self, DomainError> {
        let module = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| DomainError::InvalidModuleLine {
                line: line.to_string(),
            })?;
        Self::parse(base_name(module))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of the remote repository (user or organization).
///
/// Stored in path-cleaned form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountHandle(String);

impl AccountHandle {
    pub fn new(raw: &str) -> Self {
        Self(clean_path(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified module identifier handed to `mod init`: `<account>/<project>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath(String);

impl ModulePath {
    pub fn new(account: &AccountHandle, project: &ProjectName) -> Self {
        Self(format!("{}/{}", account.as_str(), clean_path(project.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment environment a template is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// Every environment, in generation order.
    pub const ALL: [Environment; 2] = [Environment::Dev, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered template content and where it goes, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
}

/// Lexically clean a slash-separated path.
///
/// Collapses `.` segments and repeated separators, resolves `..` against the
/// preceding segment, and drops trailing separators. An empty result is `.`.
/// The filesystem is never consulted.
///
/// # Examples
/// ```
/// use tmpl::domain::clean_path;
///
/// assert_eq!(clean_path("acme//./team/../"), "acme");
/// assert_eq!(clean_path("../acme"), "../acme");
/// assert_eq!(clean_path(""), ".");
/// ```
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes.
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
