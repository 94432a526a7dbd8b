//! Structured result of a package-name migration

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::identifier::PackageIdentifier;

/// The migration steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    LocateIdentifier,
    RewriteGradle,
    RelocateSources,
    RewritePbxproj,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::LocateIdentifier => "locate applicationId",
            Step::RewriteGradle => "rewrite build.gradle",
            Step::RelocateSources => "relocate Android sources",
            Step::RewritePbxproj => "rewrite project.pbxproj",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    /// The step changed something
    Succeeded,
    /// Nothing to do (artifact absent, nothing matched, already migrated)
    NoOp,
    /// Not attempted because an earlier step produced no input for it
    Skipped,
    /// Completed with something the user should look at
    Warning,
    /// An I/O error stopped the step; earlier steps are not rolled back
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
    pub detail: String,
}

/// One entry per step, plus the identifiers involved.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub root: PathBuf,
    /// `applicationId` found in build.gradle, if any
    pub old_identifier: Option<String>,
    pub new_identifier: PackageIdentifier,
    pub steps: Vec<StepOutcome>,
}

impl MigrationReport {
    pub(crate) fn new(root: &Path, new_identifier: PackageIdentifier) -> Self {
        Self {
            root: root.to_path_buf(),
            old_identifier: None,
            new_identifier,
            steps: Vec::with_capacity(4),
        }
    }

    pub(crate) fn record(&mut self, step: Step, status: StepStatus, detail: impl Into<String>) {
        let detail = detail.into();
        match status {
            StepStatus::Warning | StepStatus::Failed => {
                tracing::warn!(step = step.label(), ?status, "{}", detail)
            }
            _ => tracing::info!(step = step.label(), ?status, "{}", detail),
        }
        self.steps.push(StepOutcome {
            step,
            status,
            detail,
        });
    }

    /// Outcome of a given step
    pub fn step(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step)
    }

    pub fn status_of(&self, step: Step) -> Option<StepStatus> {
        self.step(step).map(|s| s.status)
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Failed)
    }

    pub fn has_warnings(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Warning)
    }
}
