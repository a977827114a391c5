//! New-project initialization service
//!
//! Creates the project directory, initializes the module, fetches the
//! baseline dependencies and writes the entry point. Every step runs against
//! an explicit project root; the process working directory is never changed.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{AccountHandle, ModulePath, ProjectName};
use crate::infrastructure::templates::ENTRY_POINT_TEMPLATE;
use crate::infrastructure::traits::{CommandRunner, FileSystem};
use crate::infrastructure::TemplateStore;

/// Project initialization service.
pub struct ScaffoldService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    templates: TemplateStore,
    settings: Arc<Settings>,
}

impl ScaffoldService {
    /// Create a new scaffold service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        templates: TemplateStore,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            fs,
            cmd,
            templates,
            settings,
        }
    }

    /// Bring a new project into existence under `base_dir`.
    ///
    /// Steps, each aborting the rest on failure:
    /// 1. create `<base_dir>/<project>` (must not exist yet)
    /// 2. `<toolchain> mod init <account>/<project>`
    /// 3. `<toolchain> get -u <dependency>` for each configured dependency
    /// 4. write the entry-point template
    ///
    /// Nothing is rolled back: a failure leaves earlier steps on disk.
    ///
    /// # Returns
    /// The project root directory.
    pub fn init_project(
        &self,
        base_dir: &Path,
        account: &AccountHandle,
        project: &ProjectName,
    ) -> ApplicationResult<PathBuf> {
        let project_root = base_dir.join(project.as_str());
        debug!(
            "init_project: project_root={}, account={}",
            project_root.display(),
            account
        );

        self.create_project_dir(&project_root)?;

        let module = ModulePath::new(account, project);
        info!("Initializing module {}", module);
        self.run_toolchain(&project_root, &["mod", "init", module.as_str()])?;

        for dependency in &self.settings.dependencies {
            info!("Fetching {}", dependency);
            self.run_toolchain(&project_root, &["get", "-u", dependency.as_str()])?;
        }

        let entry_point = self.write_entry_point(&project_root)?;
        info!("Wrote {}", entry_point.display());

        Ok(project_root)
    }

    fn create_project_dir(&self, project_root: &Path) -> ApplicationResult<()> {
        match self.fs.create_dir(project_root) {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let path = project_root.to_path_buf();
                Err(ApplicationError::DirectoryExists(path))
            }
            result => result.with_path_context("create project directory", project_root),
        }
    }

    /// Run the configured toolchain inside `dir`.
    ///
    /// Blocks until the child exits. A non-zero exit is an error carrying
    /// the child's stderr.
    pub fn run_toolchain(&self, dir: &Path, args: &[&str]) -> ApplicationResult<()> {
        let program = self.settings.toolchain.as_str();
        let command = format!("{} {}", program, args.join(" "));
        debug!("run_toolchain: dir={}, command={}", dir.display(), command);

        let output = self
            .cmd
            .run_in(dir, program, args)
            .map_err(|source| ApplicationError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::CommandFailed {
                command,
                exit_code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    /// Write the entry-point template verbatim into the project root.
    fn write_entry_point(&self, project_root: &Path) -> ApplicationResult<PathBuf> {
        let content = self.templates.get(ENTRY_POINT_TEMPLATE)?;
        let path = project_root.join(&self.settings.entry_point);
        self.fs
            .write(&path, content)
            .with_path_context("write entry point", &path)?;
        Ok(path)
    }
}
