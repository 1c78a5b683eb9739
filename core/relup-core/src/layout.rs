//! Project layout resolution for relup-core

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Explicit description of the release tree: where the project lives, what
/// the application is called, and which directories receive the config link.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    app_name: String,
    config_dir: PathBuf,
    output_dirs: Vec<PathBuf>,
}

impl ProjectLayout {
    /// Resolve a layout from a project root, deriving the application name
    /// from the root directory's own name.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self> {
        let raw = root.into();
        let root = raw
            .canonicalize()
            .with_context(|| format!("resolving project root {}", raw.display()))?;

        let app_name = root
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("cannot derive app name from {}", root.display()))?;

        Ok(Self {
            root,
            app_name,
            config_dir: PathBuf::from("config"),
            output_dirs: vec![PathBuf::from("out/release")],
        })
    }

    /// Override the derived application name.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Override the directory holding `<app>.toml` (relative paths resolve
    /// against the project root).
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Replace the default `out/release` output directory set.
    pub fn with_output_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        if !dirs.is_empty() {
            self.output_dirs = dirs;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Path of the configuration file owned by the project.
    pub fn config_source(&self) -> PathBuf {
        self.root
            .join(&self.config_dir)
            .join(format!("{}.toml", self.app_name))
    }

    /// Output directories, resolved against the project root.
    pub fn output_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.output_dirs.iter().map(|dir| self.root.join(dir))
    }

    /// Where the config link lands inside one output directory.
    pub fn link_target(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.toml", self.app_name))
    }
}
