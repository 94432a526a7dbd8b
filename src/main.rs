use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "CLI for managing Flutter-related tasks and utilities", long_about = None)]
struct Cli {
    /// Show diagnostic logs on stderr (same as RUST_LOG=nmt=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the version of the tool
    Version {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Initialize NMT configuration (writes nmt.json)
    Init,

    /// Create a new Flutter project with the NMT structure
    Create {
        /// Project name (Dart package name, e.g. shop_app)
        project_name: String,
    },

    /// Generate a feature module with data, domain and presentation layers
    Feature {
        /// Feature name, created under lib/features/
        feature_name: String,
    },

    /// Generate a responsive Flutter layout template
    FlutterLayout {
        /// Write the template to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Change the Android applicationId and iOS bundle identifier
    ChangePackageName {
        /// New dotted package name (e.g. com.example.shop)
        new_package_name: String,

        /// Output the step report as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    nmt::logging::init(cli.verbose);

    match cli.command {
        Commands::Version { json } => {
            commands::version::execute(json)?;
        }
        Commands::Init => {
            commands::init::execute()?;
        }
        Commands::Create { project_name } => {
            commands::create::execute(&project_name)?;
        }
        Commands::Feature { feature_name } => {
            commands::feature::execute(&feature_name)?;
        }
        Commands::FlutterLayout { output } => {
            commands::flutter_layout::execute(output.as_deref())?;
        }
        Commands::ChangePackageName {
            new_package_name,
            json,
        } => {
            let exit_code = commands::change_package_name::execute(&new_package_name, json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_change_package_name_args() {
        let cli = Cli::try_parse_from(["nmt", "change-package-name", "com.new.app", "--json"]).unwrap();
        match cli.command {
            Commands::ChangePackageName {
                new_package_name,
                json,
            } => {
                assert_eq!(new_package_name, "com.new.app");
                assert!(json);
            }
            _ => panic!("expected change-package-name"),
        }
    }

    #[test]
    fn test_flutter_layout_output() {
        let cli = Cli::try_parse_from(["nmt", "-v", "flutter-layout", "-o", "lib/layout.dart"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::FlutterLayout { output: Some(ref p) } if p == &PathBuf::from("lib/layout.dart")
        ));
    }

    #[test]
    fn test_missing_package_name_is_rejected() {
        assert!(Cli::try_parse_from(["nmt", "change-package-name"]).is_err());
    }
}
