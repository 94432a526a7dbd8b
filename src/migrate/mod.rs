//! Package-name migration for Flutter projects
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): `Migrator`, errors, report types
//! - Internal implementation: one function per step in internal.rs
//!
//! # Steps
//!
//! 1. **Locate**: first `applicationId "<old>"` in `android/app/build.gradle`
//! 2. **Rewrite gradle**: every `applicationId "<old>"` becomes `"<new>"`
//! 3. **Relocate sources**: `java/<old as dirs>/**` moves to `java/<new as dirs>/**`
//! 4. **Rewrite pbxproj**: `PRODUCT_BUNDLE_IDENTIFIER = <old>;` becomes `<new>;`
//!
//! Only a missing `pubspec.yaml` or an invalid new identifier aborts the
//! whole run. Everything else is recorded per step in the returned
//! [`MigrationReport`]; nothing is rolled back.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = nmt::migrate::migrate(Path::new("."), "com.example.shop")?;
//! for step in &report.steps {
//!     println!("{}: {:?} {}", step.step, step.status, step.detail);
//! }
//! # Ok::<(), nmt::migrate::MigrationError>(())
//! ```

mod internal;
mod report;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::identifier::{IdentifierError, PackageIdentifier};
use crate::paths::ProjectLayout;

pub use internal::{
    bundle_id_setting, find_application_id, ApplicationId, GradleRewrite, APPLICATION_ID_KEY,
};
pub use report::{MigrationReport, Step, StepOutcome, StepStatus};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("not a Flutter project root: {} not found", marker.display())]
    NotAProjectRoot { root: PathBuf, marker: PathBuf },

    #[error("invalid package name `{value}`: {source}")]
    InvalidIdentifier {
        value: String,
        #[source]
        source: IdentifierError,
    },

    #[error("no {key} found in {}", path.display())]
    DescriptorKeyNotFound { path: PathBuf, key: &'static str },

    #[error("{} does not exist", path.display())]
    OptionalArtifactMissing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MigrationError {
    /// Fatal errors abort before any mutation; the rest are per-step.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MigrationError::NotAProjectRoot { .. } | MigrationError::InvalidIdentifier { .. }
        )
    }

    /// Same error with file paths shown relative to `root`, for step details
    fn relative_to(mut self, root: &Path) -> Self {
        match &mut self {
            MigrationError::DescriptorKeyNotFound { path, .. }
            | MigrationError::OptionalArtifactMissing { path }
            | MigrationError::ReadFailure { path, .. }
            | MigrationError::WriteFailure { path, .. } => {
                if let Ok(rel) = path.strip_prefix(root) {
                    *path = rel.to_path_buf();
                }
            }
            MigrationError::NotAProjectRoot { .. } | MigrationError::InvalidIdentifier { .. } => {}
        }
        self
    }
}

/// Runs the migration against a project layout.
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    layout: ProjectLayout,
}

impl Migrator {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Parse `new_identifier` then run [`Migrator::migrate`].
    ///
    /// The project root is checked first so a bad directory is reported
    /// before a bad name.
    pub fn migrate_str(
        &self,
        root: &Path,
        new_identifier: &str,
    ) -> Result<MigrationReport, MigrationError> {
        self.check_root(root)?;
        let new_id = PackageIdentifier::parse(new_identifier).map_err(|source| {
            MigrationError::InvalidIdentifier {
                value: new_identifier.to_string(),
                source,
            }
        })?;
        self.migrate(root, &new_id)
    }

    /// Rename the app's package identifier under `root`.
    pub fn migrate(
        &self,
        root: &Path,
        new_id: &PackageIdentifier,
    ) -> Result<MigrationReport, MigrationError> {
        self.check_root(root)?;
        info!("migrating {} to {}", root.display(), new_id);

        let mut report = MigrationReport::new(root, new_id.clone());
        let gradle = self.layout.build_gradle_path(root);
        let describe = |e: MigrationError| e.relative_to(root).to_string();

        // Step 1
        let located = match internal::locate_application_id(&gradle) {
            Ok(found) => {
                report.record(
                    Step::LocateIdentifier,
                    StepStatus::Succeeded,
                    format!(
                        "found {} \"{}\" ({}:{})",
                        APPLICATION_ID_KEY,
                        found.value,
                        internal::display_rel(root, &gradle),
                        found.line
                    ),
                );
                Some(found)
            }
            Err(e @ MigrationError::ReadFailure { .. }) => {
                report.record(Step::LocateIdentifier, StepStatus::Failed, describe(e));
                None
            }
            Err(e) => {
                report.record(Step::LocateIdentifier, StepStatus::Warning, describe(e));
                None
            }
        };
        report.old_identifier = located.as_ref().map(|found| found.value.clone());

        // Step 2
        let gradle_ok = match &located {
            None => {
                report.record(
                    Step::RewriteGradle,
                    StepStatus::Skipped,
                    "current applicationId unknown",
                );
                false
            }
            Some(found) => match internal::rewrite_gradle(&gradle, found, new_id) {
                Ok(GradleRewrite::AlreadyCurrent) => {
                    report.record(
                        Step::RewriteGradle,
                        StepStatus::NoOp,
                        format!("{} already \"{}\"", APPLICATION_ID_KEY, new_id),
                    );
                    true
                }
                Ok(GradleRewrite::NoMatch) => {
                    report.record(
                        Step::RewriteGradle,
                        StepStatus::Warning,
                        format!(
                            "`{}` (line {}) not found when rewriting; left unchanged",
                            found.assignment, found.line
                        ),
                    );
                    false
                }
                Ok(GradleRewrite::Replaced(count)) => {
                    report.record(
                        Step::RewriteGradle,
                        StepStatus::Succeeded,
                        format!(
                            "{} \"{}\" -> \"{}\" ({} occurrence(s))",
                            APPLICATION_ID_KEY, found.value, new_id, count
                        ),
                    );
                    true
                }
                Err(e) => {
                    report.record(Step::RewriteGradle, StepStatus::Failed, describe(e));
                    false
                }
            },
        };

        // Step 3
        match (&located, gradle_ok) {
            (None, _) => report.record(
                Step::RelocateSources,
                StepStatus::Skipped,
                "current applicationId unknown",
            ),
            (Some(_), false) => report.record(
                Step::RelocateSources,
                StepStatus::Skipped,
                "build.gradle was not rewritten",
            ),
            (Some(found), true) => match PackageIdentifier::from_existing(&found.value) {
                Err(e) => report.record(
                    Step::RelocateSources,
                    StepStatus::Warning,
                    format!("cannot map \"{}\" to a directory: {}", found.value, e),
                ),
                Ok(old_id) => {
                    match internal::relocate_sources(&self.layout, root, &old_id, new_id) {
                        Ok(relocation) => report.record(
                            Step::RelocateSources,
                            relocation.status,
                            relocation.detail,
                        ),
                        Err(e) => {
                            report.record(Step::RelocateSources, StepStatus::Failed, describe(e))
                        }
                    }
                }
            },
        }

        // Step 4
        let pbxproj = self.layout.pbxproj_path(root);
        match internal::rewrite_pbxproj(&pbxproj, report.old_identifier.as_deref(), new_id) {
            Ok(0) => {
                let detail = match report.old_identifier.as_deref() {
                    None => "current bundle identifier unknown, left unchanged".to_string(),
                    Some(old) => format!("no `{}` to replace", internal::bundle_id_setting(old)),
                };
                report.record(Step::RewritePbxproj, StepStatus::NoOp, detail);
            }
            Ok(count) => report.record(
                Step::RewritePbxproj,
                StepStatus::Succeeded,
                format!(
                    "{} ({} occurrence(s))",
                    internal::bundle_id_setting(new_id.as_str()),
                    count
                ),
            ),
            Err(e @ MigrationError::OptionalArtifactMissing { .. }) => {
                report.record(Step::RewritePbxproj, StepStatus::NoOp, describe(e))
            }
            Err(e) => report.record(Step::RewritePbxproj, StepStatus::Failed, describe(e)),
        }

        Ok(report)
    }

    fn check_root(&self, root: &Path) -> Result<(), MigrationError> {
        let marker = self.layout.marker_path(root);
        if marker.is_file() {
            Ok(())
        } else {
            Err(MigrationError::NotAProjectRoot {
                root: root.to_path_buf(),
                marker,
            })
        }
    }
}

/// Migrate the project at `root` to `new_identifier` using the stock
/// Flutter layout.
pub fn migrate(root: &Path, new_identifier: &str) -> Result<MigrationReport, MigrationError> {
    Migrator::default().migrate_str(root, new_identifier)
}
