use anyhow::{Context, Result};
use nmt::scaffold;

pub fn execute(feature_name: &str) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let feature_dir = scaffold::create_feature(&cwd, feature_name)?;
    tracing::debug!("feature module at {}", feature_dir.display());

    println!("Created feature module: {feature_name}");
    Ok(())
}
