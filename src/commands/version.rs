use anyhow::Result;
use serde_json::json;

const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn execute(json: bool) -> Result<()> {
    if json {
        let version_info = json!({
            "name": "nmt",
            "version": CORE_VERSION,
        });
        println!("{}", serde_json::to_string_pretty(&version_info)?);
    } else {
        println!("NmtTool version {CORE_VERSION}");
    }
    Ok(())
}
