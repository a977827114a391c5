//! CI/CD artifact generation service
//!
//! Renders the pipeline and deployment-manifest templates once per
//! environment and writes them below a project root.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    render, Environment, GeneratedArtifact, ProjectName, ENV_TOKEN, PROJECT_NAME_TOKEN,
};
use crate::infrastructure::templates::{DEPLOYMENT_TEMPLATE, PIPELINE_TEMPLATE};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::TemplateStore;

/// Kind of artifact pair produced for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// GitHub Actions workflow deploying to ECS
    Pipeline,
    /// ECS task definition
    Deployment,
}

impl ArtifactKind {
    /// Logical path of the template this kind is rendered from.
    pub fn template(&self) -> &'static str {
        match self {
            ArtifactKind::Pipeline => PIPELINE_TEMPLATE,
            ArtifactKind::Deployment => DEPLOYMENT_TEMPLATE,
        }
    }

    /// Output path for `env`, relative to the project root.
    pub fn output_path(&self, env: Environment) -> PathBuf {
        match self {
            ArtifactKind::Pipeline => PathBuf::from(".github")
                .join("workflows")
                .join(format!("ecs-container-deployment-{env}.yml")),
            ArtifactKind::Deployment => PathBuf::from(format!("task_definition-{env}.json")),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Pipeline => f.write_str("GitHub Actions workflows"),
            ArtifactKind::Deployment => f.write_str("ECS task definitions"),
        }
    }
}

/// Outcome of one generator run.
#[derive(Debug)]
pub struct GenerationReport {
    pub kind: ArtifactKind,
    /// Written files, or the error that stopped this generator
    pub result: ApplicationResult<Vec<PathBuf>>,
}

/// Artifact generation service.
pub struct ArtifactService {
    fs: Arc<dyn FileSystem>,
    templates: TemplateStore,
}

impl ArtifactService {
    /// Create a new artifact service.
    pub fn new(fs: Arc<dyn FileSystem>, templates: TemplateStore) -> Self {
        Self { fs, templates }
    }

    /// Render one artifact without touching the filesystem.
    pub fn render(
        &self,
        kind: ArtifactKind,
        project: &ProjectName,
        env: Environment,
    ) -> ApplicationResult<GeneratedArtifact> {
        let named = self.named_template(kind, project)?;
        Ok(Self::for_environment(kind, &named, env))
    }

    /// Template of `kind` with the project name already substituted.
    fn named_template(
        &self,
        kind: ArtifactKind,
        project: &ProjectName,
    ) -> ApplicationResult<String> {
        let template = self.templates.get(kind.template())?;
        Ok(render(template, &[(PROJECT_NAME_TOKEN, project.as_str())]))
    }

    fn for_environment(kind: ArtifactKind, named: &str, env: Environment) -> GeneratedArtifact {
        GeneratedArtifact {
            path: kind.output_path(env),
            content: render(named, &[(ENV_TOKEN, env.as_str())]),
        }
    }

    /// Render and write the `dev` and `prod` artifacts of `kind`.
    ///
    /// The first failing write aborts the rest of this generator.
    ///
    /// # Returns
    /// Absolute paths of the written files, in environment order.
    pub fn generate(
        &self,
        kind: ArtifactKind,
        project_root: &Path,
        project: &ProjectName,
    ) -> ApplicationResult<Vec<PathBuf>> {
        debug!(
            "generate: kind={:?}, project_root={}",
            kind,
            project_root.display()
        );
        let named = self.named_template(kind, project)?;
        let mut written = Vec::new();

        for env in Environment::ALL {
            let artifact = Self::for_environment(kind, &named, env);
            let path = project_root.join(&artifact.path);

            if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                let dir = project_root.join(parent);
                self.fs
                    .create_dir_all(&dir)
                    .with_path_context("create directory", &dir)?;
            }

            self.fs
                .write(&path, &artifact.content)
                .with_path_context("write artifact", &path)?;
            written.push(path);
        }

        debug!("generate: wrote {} files", written.len());
        Ok(written)
    }

    /// Run one generator per requested kind in parallel and wait for all of them.
    ///
    /// A failing generator does not stop the others. Reports come back in the
    /// order of `kinds`.
    pub fn generate_all(
        &self,
        kinds: &[ArtifactKind],
        project_root: &Path,
        project: &ProjectName,
    ) -> Vec<GenerationReport> {
        kinds
            .par_iter()
            .map(|&kind| {
                let result = self.generate(kind, project_root, project);
                if let Err(e) = &result {
                    debug!("generate_all: {} failed: {}", kind, e);
                }
                GenerationReport { kind, result }
            })
            .collect()
    }
}
