use anyhow::{Context, Result};
use nmt::scaffold::{self, FlutterCli};

pub fn execute(project_name: &str) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let project_dir = scaffold::create_project(&FlutterCli, &cwd, project_name)?;
    tracing::debug!("project skeleton ready at {}", project_dir.display());

    println!("Created NMT project: {project_name}");
    Ok(())
}
