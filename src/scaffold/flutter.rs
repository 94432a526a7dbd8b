use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

use super::ProjectScaffolder;

/// Runs `flutter create <name>` from the `flutter` found on PATH
#[derive(Debug, Clone, Copy, Default)]
pub struct FlutterCli;

impl ProjectScaffolder for FlutterCli {
    fn name(&self) -> &'static str {
        "flutter"
    }

    fn create_project(&self, parent: &Path, name: &str) -> Result<()> {
        let flutter = which::which("flutter")
            .context("Flutter SDK is required but `flutter` was not found in PATH")?;
        debug!("running {} create {} in {}", flutter.display(), name, parent.display());

        let status = Command::new(&flutter)
            .arg("create")
            .arg(name)
            .current_dir(parent)
            .status()
            .context("Failed to execute flutter create")?;

        if !status.success() {
            bail!("flutter create exited with {}", status);
        }
        Ok(())
    }
}
