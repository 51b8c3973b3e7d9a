//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use kinship_domain::{IdentityId, RelationshipId};
use std::path::PathBuf;

/// Kinship CLI - Manage relationship requests between identities.
#[derive(Debug, Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KINSHIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(short, long, global = true, env = "KINSHIP_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage registered identities
    Identity(IdentityArgs),

    /// Send a relationship request
    Request(RequestArgs),

    /// Accept a pending request
    Accept(AnswerArgs),

    /// Reject a pending request
    Reject(AnswerArgs),

    /// Remove a pending or accepted relationship
    Remove(RemoveArgs),

    /// List accepted relationships of an identity
    Friends(FriendsArgs),

    /// List pending requests of an identity
    Pending(PendingArgs),

    /// List mutual friends of two identities
    Mutual(MutualArgs),

    /// Show one relationship
    Show(ShowArgs),
}

/// Arguments for identity management.
#[derive(Debug, Parser)]
pub struct IdentityArgs {
    #[command(subcommand)]
    pub action: IdentityAction,
}

/// Identity management actions.
#[derive(Debug, Subcommand)]
pub enum IdentityAction {
    /// Register (or reactivate) an identity
    Add {
        /// Identity id (positive integer)
        id: IdentityId,
        /// Display handle
        handle: String,
    },

    /// Mark an identity inactive
    Deactivate {
        /// Identity id
        id: IdentityId,
    },
}

/// Arguments for the request command.
#[derive(Debug, Parser)]
pub struct RequestArgs {
    /// Identity sending the request
    pub from: IdentityId,

    /// Identity receiving the request
    pub to: IdentityId,
}

/// Arguments for accept and reject.
#[derive(Debug, Parser)]
pub struct AnswerArgs {
    /// Relationship id
    pub id: RelationshipId,
}

/// Arguments for the remove command.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct RemoveArgs {
    /// Relationship id
    #[arg(long)]
    pub id: Option<RelationshipId>,

    /// The two identities of the relationship
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    pub pair: Option<Vec<IdentityId>>,
}

/// Arguments for the friends command.
#[derive(Debug, Parser)]
pub struct FriendsArgs {
    /// Identity whose friends to list
    pub identity: IdentityId,
}

/// Arguments for the pending command.
#[derive(Debug, Parser)]
pub struct PendingArgs {
    /// Identity whose requests to list
    pub identity: IdentityId,

    /// List requests the identity sent instead of received
    #[arg(short, long)]
    pub outgoing: bool,
}

/// Arguments for the mutual command.
#[derive(Debug, Parser)]
pub struct MutualArgs {
    /// First identity; listed records are this identity's
    pub a: IdentityId,

    /// Second identity
    pub b: IdentityId,

    /// Print only the mutual friends' identity ids
    #[arg(long)]
    pub ids: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Relationship id
    pub id: RelationshipId,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
