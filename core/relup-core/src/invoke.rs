//! Build tool invocation for relup-core

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::info;

/// A fully-specified build invocation: the program, its arguments, and the
/// directory it runs from. The tool itself is opaque; only its exit status
/// matters.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
    current_dir: PathBuf,
}

impl BuildCommand {
    /// The stock invocation: `cargo build --release` in the project root.
    pub fn cargo_release(root: &Path) -> Self {
        Self {
            program: "cargo".to_owned(),
            args: vec!["build".to_owned(), "--release".to_owned()],
            current_dir: root.to_path_buf(),
        }
    }

    /// Parse a user-supplied command line. Whitespace-delimited; the first
    /// token is the program.
    pub fn parse(line: &str, root: &Path) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_owned);
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("build command is empty"))?;

        Ok(Self {
            program,
            args: parts.collect(),
            current_dir: root.to_path_buf(),
        })
    }

    /// Render the command line for logs and reports.
    pub fn rendered(&self) -> String {
        let mut text = self.program.clone();
        for arg in &self.args {
            text.push(' ');
            text.push_str(arg);
        }
        text
    }

    /// Run the build synchronously with inherited stdio. Non-zero exit is
    /// an error carrying the status; it aborts the release.
    pub fn run(&self) -> Result<()> {
        info!(command = %self.rendered(), "invoking build");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.current_dir)
            .status()
            .with_context(|| format!("spawning build command `{}`", self.rendered()))?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(anyhow!(
                "build command `{}` exited with status {code}",
                self.rendered()
            )),
            None => Err(anyhow!(
                "build command `{}` was terminated by a signal",
                self.rendered()
            )),
        }
    }
}
