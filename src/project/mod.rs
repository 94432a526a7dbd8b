//! Project module - Flutter project detection and NMT metadata
//!
//! Manages `nmt.json`, a small metadata file recording the project name and
//! the NMT structure version.
//!
//! # Example
//!
//! ```no_run
//! use nmt::project;
//! use std::path::Path;
//!
//! let path = Path::new(".");
//!
//! if project::is_flutter_project(path) {
//!     let config = project::init(path)?;
//!     println!("Project: {}", config.project_name);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::path::Path;

pub use internal::{NmtConfig, NMT_STRUCTURE_VERSION};

/// Check if a directory is a Flutter project root (has pubspec.yaml)
pub fn is_flutter_project(path: &Path) -> bool {
    internal::is_flutter_project(path)
}

/// Write `nmt.json` for the project at `path`, named after the directory.
///
/// Overwrites an existing file.
pub fn init(path: &Path) -> Result<NmtConfig> {
    internal::init(path)
}

/// Load `nmt.json`; `None` if the file doesn't exist
pub fn load_config(path: &Path) -> Result<Option<NmtConfig>> {
    internal::load(path)
}

/// Save `nmt.json`
pub fn save_config(path: &Path, config: &NmtConfig) -> Result<()> {
    internal::save(path, config)
}
