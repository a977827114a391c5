//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::services::ArtifactKind;

/// Scaffold backend-service projects with dependencies, CI workflows and ECS task definitions
#[derive(Parser, Debug)]
#[command(name = "tmpl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Base directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    #[command(long_about = "Create a new project with the Echo, Zap and Godotenv installed")]
    New {
        /// GitHub account owning the module
        #[arg(value_name = "GITHUB_ACCOUNT")]
        account: String,
        /// Project name (also the directory created)
        #[arg(value_name = "PROJECT_NAME")]
        project_name: String,
        #[command(flatten)]
        artifacts: ArtifactFlags,
    },

    /// Add CI/CD templates to an existing project
    #[command(
        long_about = "Add CI/CD templates to an existing project. The project name is read from the module descriptor (go.mod)."
    )]
    Add {
        #[command(flatten)]
        artifacts: ArtifactFlags,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Optional artifact pairs, shared by `new` and `add`.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactFlags {
    /// Add templates for ECS CI deployment
    #[arg(short, long)]
    pub ecs: bool,

    /// Add the GitHub Actions folder with a certain template
    #[arg(short, long)]
    pub gh: bool,
}

impl ArtifactFlags {
    /// Artifact kinds selected by the flags.
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        let mut kinds = Vec::new();
        if self.ecs {
            kinds.push(ArtifactKind::Deployment);
        }
        if self.gh {
            kinds.push(ArtifactKind::Pipeline);
        }
        kinds
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init,

    /// Show config path
    Path,
}
