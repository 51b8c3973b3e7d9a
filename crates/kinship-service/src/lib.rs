//! Kinship Service
//!
//! Relationship request lifecycle and query facade.
//!
//! # Overview
//!
//! The service is responsible for:
//! - **Requests**: creating a pending relationship from an initiator to a target
//! - **Answers**: accepting or rejecting a pending request, idempotently
//! - **Removal**: deleting pending or accepted relationships by pair or id
//! - **Queries**: friends of an identity, mutual friends, pending requests
//!
//! # Lifecycle
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | (none) | `create_request` | **Pending** |
//! | **Pending** | `accept_request` | **Accepted** |
//! | **Pending** | `reject_request` | **Rejected** |
//! | **Rejected** | `create_request` | new **Pending** record (new id) |
//! | **Pending** / **Accepted** | `delete_by_pair`, `delete_by_id` | (none) |
//!
//! Every other combination is a no-op that succeeds with a [`Notice`].
//! At most one record exists per unordered pair of identities; the store
//! enforces that with a uniqueness constraint, and the service turns a lost
//! race into the same notice a sequential caller would have seen.
//!
//! # Usage
//!
//! ```no_run
//! use kinship_domain::IdentityId;
//! use kinship_service::{Notice, RelationshipService, Reply};
//! use kinship_store::SqliteStore;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::open("kinship.db")?);
//! let service = RelationshipService::new(store.clone(), store);
//!
//! let alice = IdentityId::new(1)?;
//! let bob = IdentityId::new(2)?;
//!
//! if let Reply::Created(request) = service.create_request(alice, bob)? {
//!     assert_eq!(service.accept_request(request.id)?, Notice::Accepted);
//! }
//! println!("{} friends", service.list_by_user(alice)?.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [lifecycle]
//! friend_list_scope = "both"   # or "initiated"
//! ```
//!
//! # Errors
//!
//! Failures come back as [`ServiceError`], classified by [`ErrorKind`]
//! (validation, not found, server). Each failure is also handed to the
//! injected [`OutcomeLog`]; the default writes `tracing` events.

#![warn(missing_docs)]

mod config;
mod error;
mod lifecycle;
mod log;
mod outcome;
mod queries;

#[cfg(test)]
mod testing;

pub use config::{FriendListScope, LifecycleConfig};
pub use error::{BoxError, ErrorKind, Missing, ServiceError, ServiceResult};
pub use lifecycle::RelationshipService;
pub use log::{OutcomeLog, TracingOutcomeLog};
pub use outcome::{Notice, Reply};
pub use queries::PendingDirection;
