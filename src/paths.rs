//! Single source of truth for the Flutter project layout nmt touches.
//!
//! This module defines WHERE things live. It has no I/O, no validation,
//! no business logic.
//!
//! ```text
//! project/
//! ├── pubspec.yaml                          # Project marker (never modified)
//! ├── nmt.json                              # NMT metadata
//! ├── lib/
//! │   ├── core/ features/ shared/ config/   # NMT skeleton
//! ├── android/app/
//! │   ├── build.gradle                      # applicationId "<id>"
//! │   └── src/main/java/<id as dirs>/       # Namespace directory tree
//! └── ios/Runner.xcodeproj/
//!     └── project.pbxproj                   # PRODUCT_BUNDLE_IDENTIFIER = <id>;
//! ```

use std::path::{Path, PathBuf};

use crate::identifier::PackageIdentifier;

/// Marker file proving a directory is a Flutter project root
pub const PUBSPEC: &str = "pubspec.yaml";

/// Android build descriptor, relative to the project root
pub const ANDROID_BUILD_GRADLE: &str = "android/app/build.gradle";

/// iOS project descriptor, relative to the project root
pub const IOS_PROJECT_PBXPROJ: &str = "ios/Runner.xcodeproj/project.pbxproj";

/// Base of the Android namespace directory tree, relative to the project root
pub const ANDROID_SOURCE_BASE: &str = "android/app/src/main/java";

/// NMT metadata file, relative to the working directory
pub const NMT_CONFIG: &str = "nmt.json";

/// Directories created under a new project's root by `nmt create`
pub const PROJECT_SKELETON: [&str; 4] = ["lib/core", "lib/features", "lib/shared", "lib/config"];

/// Parent of every feature module: `lib/features/`
pub const FEATURES_DIR: &str = "lib/features";

/// Layers created inside each feature module
pub const FEATURE_LAYERS: [&str; 3] = ["data", "domain", "presentation"];

/// Locations of the artifacts the identifier migrator reads and writes.
///
/// All paths are relative to the project root. `Default` is the stock
/// Flutter layout; tests and unusual projects can substitute their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub marker: PathBuf,
    pub build_gradle: PathBuf,
    pub pbxproj: PathBuf,
    pub source_base: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            marker: PathBuf::from(PUBSPEC),
            build_gradle: PathBuf::from(ANDROID_BUILD_GRADLE),
            pbxproj: PathBuf::from(IOS_PROJECT_PBXPROJ),
            source_base: PathBuf::from(ANDROID_SOURCE_BASE),
        }
    }
}

impl ProjectLayout {
    /// Project marker: `{root}/pubspec.yaml`
    pub fn marker_path(&self, root: &Path) -> PathBuf {
        root.join(&self.marker)
    }

    /// Android descriptor: `{root}/android/app/build.gradle`
    pub fn build_gradle_path(&self, root: &Path) -> PathBuf {
        root.join(&self.build_gradle)
    }

    /// iOS descriptor: `{root}/ios/Runner.xcodeproj/project.pbxproj`
    pub fn pbxproj_path(&self, root: &Path) -> PathBuf {
        root.join(&self.pbxproj)
    }

    /// Namespace base: `{root}/android/app/src/main/java`
    pub fn source_base_path(&self, root: &Path) -> PathBuf {
        root.join(&self.source_base)
    }

    /// Namespace directory for an identifier: `{root}/android/app/src/main/java/com/example/app`
    pub fn namespace_dir(&self, root: &Path, id: &PackageIdentifier) -> PathBuf {
        self.source_base_path(root).join(id.to_relative_path())
    }
}

/// NMT metadata file: `{root}/nmt.json`
pub fn config_path(root: &Path) -> PathBuf {
    root.join(NMT_CONFIG)
}

/// Feature module directory: `{root}/lib/features/{name}`
pub fn feature_dir(root: &Path, name: &str) -> PathBuf {
    root.join(FEATURES_DIR).join(name)
}
