//! tmpl: scaffold backend-service projects
//!
//! Creates a project, installs its baseline dependencies and renders
//! GitHub Actions workflows and ECS task definitions per environment.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
