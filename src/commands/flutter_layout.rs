use anyhow::Result;
use nmt::layout;
use std::path::Path;

pub fn execute(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            layout::write_template(path)?;
            println!("✓ Wrote responsive layout to {}", path.display());
        }
        None => {
            println!("Responsive Flutter Layout Code:\n");
            println!("{}", layout::RESPONSIVE_LAYOUT);
        }
    }
    Ok(())
}
