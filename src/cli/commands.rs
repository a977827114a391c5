//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::application::services::ArtifactKind;
use crate::cli::args::{ArtifactFlags, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{AccountHandle, ProjectName};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Load settings, wire up services and run the parsed command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        print_completions(*shell);
        return Ok(());
    }

    let settings = Settings::load()?;
    debug!("execute_command: settings={:?}", settings);
    let container = ServiceContainer::new(settings);
    dispatch(cli, &container)
}

/// Run the parsed command against an already wired container.
pub fn dispatch(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let base_dir = cli.project_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    match &cli.command {
        Commands::New {
            account,
            project_name,
            artifacts,
        } => cmd_new(container, &base_dir, account, project_name, *artifacts),
        Commands::Add { artifacts } => cmd_add(container, &base_dir, *artifacts),
        Commands::Config { command } => cmd_config(container, command),
        Commands::Completion { shell } => {
            print_completions(*shell);
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn cmd_new(
    container: &ServiceContainer,
    base_dir: &Path,
    account: &str,
    project_name: &str,
    artifacts: ArtifactFlags,
) -> CliResult<()> {
    let project = ProjectName::parse(project_name)?;
    let account = AccountHandle::new(account);

    let project_root = container
        .scaffold_service()
        .init_project(base_dir, &account, &project)?;
    output::success(&format!("Created project {}", project_root.display()));

    generate_artifacts(container, &project_root, &project, &artifacts.kinds())
}

#[instrument(skip(container))]
fn cmd_add(
    container: &ServiceContainer,
    project_root: &Path,
    artifacts: ArtifactFlags,
) -> CliResult<()> {
    let project = container.descriptor_service().project_name(project_root)?;
    info!("Adding artifacts for project {}", project);

    let kinds = artifacts.kinds();
    if kinds.is_empty() {
        output::warning("nothing to add, pass --ecs and/or --gh");
        return Ok(());
    }

    generate_artifacts(container, project_root, &project, &kinds)
}

/// Run the requested generators concurrently and report each one.
///
/// Every generator runs to completion. The first failure becomes the command's
/// error and is printed by the caller; any further failures are printed here.
fn generate_artifacts(
    container: &ServiceContainer,
    project_root: &Path,
    project: &ProjectName,
    kinds: &[ArtifactKind],
) -> CliResult<()> {
    if kinds.is_empty() {
        return Ok(());
    }

    let reports = container
        .artifact_service()
        .generate_all(kinds, project_root, project);

    let mut first_error = None;
    for report in reports {
        match report.result {
            Ok(paths) => {
                output::success(&report.kind);
                for path in &paths {
                    let shown = path.strip_prefix(project_root).unwrap_or(path);
                    output::success_detail(&shown.display());
                }
            }
            Err(e) => {
                output::failure(&report.kind);
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    output::error(&e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("cannot determine config directory"),
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            init_config(container, &path)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

/// Write the commented config template to `path`, refusing to overwrite.
pub fn init_config(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    if container.fs.exists(path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    container
        .fs
        .ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    container
        .fs
        .write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
