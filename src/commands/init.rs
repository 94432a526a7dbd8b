use anyhow::{Context, Result};
use nmt::project;

pub fn execute() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if !project::is_flutter_project(&cwd) {
        eprintln!("⚠️  No pubspec.yaml here - writing nmt.json anyway");
    }

    let config = project::init(&cwd)?;
    tracing::debug!("wrote nmt.json for {}", config.project_name);

    println!("Initialized NMT configuration");
    Ok(())
}
