//! Kinship Domain Layer
//!
//! Core model for directed relationship requests ("friendship" edges)
//! between identities. Defines the value objects, the lifecycle state
//! machine and the trait boundaries that storage and identity
//! infrastructure implement.
//!
//! ## Key Concepts
//!
//! - **Relationship**: a request from an initiator to a target
//! - **Pair**: the unordered pair of identities; at most one record per pair
//! - **Status**: `Pending`, then exactly one of `Accepted` or `Rejected`
//! - **Resurrection**: replacing a `Rejected` record with a fresh `Pending` one
//!
//! ## Architecture
//!
//! - No I/O and no infrastructure dependencies (only `uuid`)
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod relationship;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use error::DomainError;
pub use id::{IdentityId, RelationshipId};
pub use relationship::{current_millis, MutualRow, NewRelationship, Pair, Relationship, Side};
pub use status::{RelationshipStatus, StatusChange, ACTIVE_STATUSES};
