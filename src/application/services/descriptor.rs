//! Module descriptor lookup for existing projects

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::ProjectName;
use crate::infrastructure::traits::FileSystem;

/// Reads the project identity out of an existing module descriptor.
pub struct DescriptorService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl DescriptorService {
    /// Create a new descriptor service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Project name declared by the descriptor in `project_root`.
    ///
    /// Only the first line is read: `module github.com/acme/widget` → `widget`.
    pub fn project_name(&self, project_root: &Path) -> ApplicationResult<ProjectName> {
        let path = project_root.join(&self.settings.module_descriptor);
        debug!("project_name: descriptor={}", path.display());

        if !self.fs.exists(&path) {
            return Err(ApplicationError::DescriptorMissing(path));
        }

        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read module descriptor", &path)?;
        let first_line = content
            .lines()
            .next()
            .ok_or_else(|| ApplicationError::DescriptorEmpty(path.clone()))?;

        let name = ProjectName::from_module_line(first_line)?;
        debug!("project_name: {}", name);
        Ok(name)
    }
}
