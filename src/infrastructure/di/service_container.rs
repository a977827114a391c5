//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ArtifactService, DescriptorService, ScaffoldService};
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};
use crate::infrastructure::TemplateStore;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Embedded templates
    pub templates: TemplateStore,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
            TemplateStore::embedded(),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        templates: TemplateStore,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            cmd,
            templates,
        }
    }

    pub fn scaffold_service(&self) -> ScaffoldService {
        ScaffoldService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.cmd),
            self.templates,
            Arc::clone(&self.settings),
        )
    }

    pub fn artifact_service(&self) -> ArtifactService {
        ArtifactService::new(Arc::clone(&self.fs), self.templates)
    }

    pub fn descriptor_service(&self) -> DescriptorService {
        DescriptorService::new(Arc::clone(&self.fs), Arc::clone(&self.settings))
    }
}
