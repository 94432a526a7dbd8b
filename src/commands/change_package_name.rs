use anyhow::{Context, Result};
use colored::Colorize;
use nmt::migrate::{self, MigrationReport, StepStatus};

/// Exit code when at least one step failed
pub const EXIT_STEP_FAILED: i32 = 2;

/// Rename the package of the Flutter project in the current directory.
///
/// Returns the process exit code: 0, or 2 if a step failed. A missing
/// pubspec.yaml or an invalid name is an error (exit 1 via main).
pub fn execute(new_package_name: &str, json: bool) -> Result<i32> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let report = migrate::migrate(&cwd, new_package_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.has_failures() {
        EXIT_STEP_FAILED
    } else {
        0
    })
}

fn print_report(report: &MigrationReport) {
    println!(
        "📦 Changing package name to {}",
        report.new_identifier.to_string().bold()
    );

    for outcome in &report.steps {
        let marker = match outcome.status {
            StepStatus::Succeeded => "✓".green(),
            StepStatus::NoOp | StepStatus::Skipped => "•".dimmed(),
            StepStatus::Warning => "⚠".yellow(),
            StepStatus::Failed => "✗".red(),
        };
        let line = format!("   {} {}: {}", marker, outcome.step, outcome.detail);
        match outcome.status {
            StepStatus::Warning | StepStatus::Failed => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    if report.has_failures() {
        eprintln!("\n{}", "Some steps failed; completed steps were kept.".red());
    }
}
