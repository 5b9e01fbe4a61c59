//! Command handlers for the metaform binary

mod convert;
mod project_root;
mod resolve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metaform::config::Config;
use tracing::debug;

pub use convert::{cmd_convert, ConvertArgs};
pub use resolve::cmd_resolve;

/// Settings shared by every command
pub struct CommandContext {
    pub cwd: PathBuf,
    pub project_root: PathBuf,
    pub config: Config,
    pub json: bool,
    pub verbose: u8,
}

impl CommandContext {
    /// Find the project root and load its configuration
    ///
    /// Config warnings go to stderr so `--json` output stays parseable.
    pub fn load(project_root: Option<PathBuf>, json: bool, verbose: u8) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read the current directory")?;
        let project_root = match project_root {
            Some(root) => absolutize(&cwd, &root),
            None => project_root::discover_project_root(&cwd),
        };
        debug!(root = %project_root.display(), "project root");

        let (config, warnings) = Config::load_or_default(&project_root)?;
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }

        Ok(Self {
            cwd,
            project_root,
            config,
            json,
            verbose,
        })
    }

    /// Paths from the command line, or the configured package directories
    pub fn input_paths(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        if paths.is_empty() {
            self.config
                .project
                .packages()
                .iter()
                .map(|p| absolutize(&self.project_root, p))
                .collect()
        } else {
            paths.iter().map(|p| absolutize(&self.cwd, p)).collect()
        }
    }
}

pub(crate) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
