pub mod fsutil;
pub mod identifier;
pub mod layout;
pub mod logging;
pub mod migrate;
pub mod paths;
pub mod project;
pub mod scaffold;

// Re-export commonly used types
pub use identifier::PackageIdentifier;
pub use migrate::{MigrationError, MigrationReport, Migrator};
pub use paths::ProjectLayout;
