//! Project and feature skeletons
//!
//! Creating the Flutter project itself is delegated to a [`ProjectScaffolder`]
//! so nothing here depends on the `flutter` binary being installed.
//! [`FlutterCli`] is the real implementation.

mod flutter;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

pub use flutter::FlutterCli;

/// Capability to create an empty Flutter project
pub trait ProjectScaffolder {
    /// Name shown in messages
    fn name(&self) -> &'static str;

    /// Create project `name` as a new directory under `parent`
    fn create_project(&self, parent: &Path, name: &str) -> Result<()>;
}

/// Create a Flutter project with the NMT skeleton.
///
/// Returns the project directory.
pub fn create_project(
    scaffolder: &dyn ProjectScaffolder,
    parent: &Path,
    name: &str,
) -> Result<PathBuf> {
    validate_project_name(name)?;

    scaffolder
        .create_project(parent, name)
        .with_context(|| format!("{} could not create project '{}'", scaffolder.name(), name))?;

    let project_dir = parent.join(name);
    for dir in paths::PROJECT_SKELETON {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    Ok(project_dir)
}

/// Create `lib/features/<name>/{data,domain,presentation}` under `root`.
///
/// Returns the feature directory. Existing directories are left alone.
pub fn create_feature(root: &Path, name: &str) -> Result<PathBuf> {
    validate_feature_name(name)?;

    let feature_dir = paths::feature_dir(root, name);
    for layer in paths::FEATURE_LAYERS {
        let path = feature_dir.join(layer);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    Ok(feature_dir)
}

/// Dart package name: lowercase letters, digits, underscores; no leading digit
pub fn validate_project_name(name: &str) -> Result<()> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid {
        bail!(
            "Invalid project name '{}': use lowercase letters, digits and underscores, not starting with a digit",
            name
        );
    }
    Ok(())
}

/// A feature name is exactly one path segment
pub fn validate_feature_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("Invalid feature name '{}': must be a single directory name", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records calls and creates a bare pubspec instead of running flutter
    #[derive(Default)]
    struct FakeScaffolder {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl ProjectScaffolder for FakeScaffolder {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn create_project(&self, parent: &Path, name: &str) -> Result<()> {
            self.calls.borrow_mut().push(name.to_string());
            if self.fail {
                bail!("boom");
            }
            let dir = parent.join(name);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("pubspec.yaml"), format!("name: {name}\n"))?;
            Ok(())
        }
    }

    #[test]
    fn test_create_project_adds_skeleton() {
        let tmp = TempDir::new().unwrap();
        let scaffolder = FakeScaffolder::default();

        let dir = create_project(&scaffolder, tmp.path(), "shop_app").unwrap();

        assert_eq!(dir, tmp.path().join("shop_app"));
        assert_eq!(*scaffolder.calls.borrow(), vec!["shop_app".to_string()]);
        for sub in ["lib/core", "lib/features", "lib/shared", "lib/config"] {
            assert!(dir.join(sub).is_dir(), "missing {sub}");
        }
    }

    #[test]
    fn test_create_project_stops_when_scaffolder_fails() {
        let tmp = TempDir::new().unwrap();
        let scaffolder = FakeScaffolder {
            fail: true,
            ..Default::default()
        };

        let err = create_project(&scaffolder, tmp.path(), "shop_app").unwrap_err();
        assert!(format!("{err:#}").contains("boom"));
        assert!(!tmp.path().join("shop_app").exists());
    }

    #[test]
    fn test_create_project_rejects_bad_names_before_scaffolding() {
        let tmp = TempDir::new().unwrap();
        let scaffolder = FakeScaffolder::default();

        for name in ["", "ShopApp", "1app", "my-app", "../x"] {
            assert!(create_project(&scaffolder, tmp.path(), name).is_err(), "{name}");
        }
        assert!(scaffolder.calls.borrow().is_empty());
    }

    #[test]
    fn test_create_feature_is_idempotent() {
        let tmp = TempDir::new().unwrap();

        let dir = create_feature(tmp.path(), "login").unwrap();
        fs::write(dir.join("data/repo.dart"), "// repo").unwrap();
        create_feature(tmp.path(), "login").unwrap();

        assert!(dir.join("domain").is_dir());
        assert!(dir.join("presentation").is_dir());
        assert!(dir.join("data/repo.dart").exists());
    }

    #[test]
    fn test_feature_name_must_be_one_segment() {
        let tmp = TempDir::new().unwrap();
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(create_feature(tmp.path(), name).is_err(), "{name}");
        }
    }
}
