//! Domain-level validation errors

use std::fmt;

use crate::IdentityId;

/// Errors raised while constructing domain values
///
/// Kept dependency-free; infrastructure crates wrap these in their own
/// `thiserror` enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Both sides of a relationship are the same identity
    SelfRelationship(IdentityId),

    /// Not a usable identity reference
    InvalidIdentity(String),

    /// Not a usable relationship identifier
    InvalidRelationshipId(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::SelfRelationship(id) => {
                write!(f, "identity {id} cannot hold a relationship with itself")
            }
            DomainError::InvalidIdentity(raw) => write!(f, "invalid identity id: {raw}"),
            DomainError::InvalidRelationshipId(raw) => {
                write!(f, "invalid relationship id: {raw}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
