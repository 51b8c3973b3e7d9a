//! Kinship CLI library.
//!
//! Core of the `kinship` command-line tool: configuration, argument
//! parsing, command execution against a SQLite-backed relationship
//! service, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use kinship_service::{LifecycleConfig, RelationshipService};
use kinship_store::SqliteStore;
use std::path::Path;
use std::sync::Arc;

pub use cli::{Cli, Command};
pub use config::KinshipConfig;
pub use error::{CliError, Result};
pub use output::Formatter;

/// Relationship service over one SQLite store acting as both the
/// relationship store and the identity directory
pub type Service = RelationshipService<Arc<SqliteStore>, Arc<SqliteStore>>;

/// Open the database at `path` and build the service on top of it
pub fn open_service<P: AsRef<Path>>(path: P, lifecycle: LifecycleConfig) -> Result<Service> {
    let store = Arc::new(SqliteStore::open(path)?);
    Ok(RelationshipService::new(store.clone(), store).with_config(lifecycle))
}

/// Run one parsed command and return its output
pub fn execute(command: Command, service: &Service, formatter: &Formatter) -> Result<String> {
    match command {
        Command::Identity(args) => commands::execute_identity(args, service, formatter),
        Command::Request(args) => commands::execute_request(args, service, formatter),
        Command::Accept(args) => commands::execute_accept(args, service, formatter),
        Command::Reject(args) => commands::execute_reject(args, service, formatter),
        Command::Remove(args) => commands::execute_remove(args, service, formatter),
        Command::Friends(args) => commands::execute_friends(args, service, formatter),
        Command::Pending(args) => commands::execute_pending(args, service, formatter),
        Command::Mutual(args) => commands::execute_mutual(args, service, formatter),
        Command::Show(args) => commands::execute_show(args, service, formatter),
    }
}
