//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tmpl/tmpl.toml`
//! 3. Environment variables: `TMPL_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Packages fetched into every new project: web framework, structured logger, dotenv loader.
pub const DEFAULT_DEPENDENCIES: [&str; 3] = [
    "github.com/labstack/echo/v4",
    "go.uber.org/zap",
    "github.com/joho/godotenv",
];

/// Unified configuration for tmpl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Toolchain binary used for `mod init` and `get -u` (default: go)
    pub toolchain: String,
    /// Package coordinates fetched, in order, into a new project
    pub dependencies: Vec<String>,
    /// File name of the entry point written into a new project
    pub entry_point: String,
    /// Module descriptor read by `add` to find the project name
    pub module_descriptor: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toolchain: "go".into(),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
            entry_point: "main.go".into(),
            module_descriptor: "go.mod".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub toolchain: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub entry_point: Option<String>,
    pub module_descriptor: Option<String>,
}

/// Get the XDG config directory for tmpl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tmpl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tmpl.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings from defaults, the global config file and `TMPL_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using an explicit global config file location.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path.filter(|p| p.exists()) {
            debug!("load_from: global config {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Overlay wins wherever it specifies a value. Arrays are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            toolchain: overlay
                .toolchain
                .clone()
                .unwrap_or_else(|| self.toolchain.clone()),
            dependencies: overlay
                .dependencies
                .clone()
                .unwrap_or_else(|| self.dependencies.clone()),
            entry_point: overlay
                .entry_point
                .clone()
                .unwrap_or_else(|| self.entry_point.clone()),
            module_descriptor: overlay
                .module_descriptor
                .clone()
                .unwrap_or_else(|| self.module_descriptor.clone()),
        }
    }

    /// Apply TMPL_* environment variables as explicit overrides.
    ///
    /// `TMPL_DEPENDENCIES` is a comma-separated list.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TMPL"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("toolchain") {
            settings.toolchain = val;
        }
        if let Ok(val) = config.get_string("dependencies") {
            settings.dependencies = val
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(val) = config.get_string("entry_point") {
            settings.entry_point = val;
        }
        if let Ok(val) = config.get_string("module_descriptor") {
            settings.module_descriptor = val;
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the toolchain path.
    fn expand_paths(&mut self) {
        self.toolchain = expand_env_vars(&self.toolchain);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tmpl configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tmpl/tmpl.toml
#   Env:    TMPL_* environment variables (TMPL_DEPENDENCIES is comma-separated)

# Toolchain binary used for `mod init` and `get -u`
# toolchain = "go"

# Packages fetched into every new project, in order
# dependencies = [
#     "github.com/labstack/echo/v4",
#     "go.uber.org/zap",
#     "github.com/joho/godotenv",
# ]

# Entry point written into a new project
# entry_point = "main.go"

# Module descriptor read by `tmpl add`
# module_descriptor = "go.mod"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
