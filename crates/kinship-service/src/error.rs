//! Error types for relationship operations

use kinship_domain::{DomainError, IdentityId, RelationshipId};
use std::fmt;
use thiserror::Error;

/// Boxed collaborator error kept for diagnostics
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or disallowed input
    Validation,

    /// An identity or relationship does not exist
    NotFound,

    /// A collaborator (store, identity service) failed
    Server,
}

/// What could not be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// The requesting identity does not exist or is inactive
    Initiator(IdentityId),

    /// The requested identity does not exist or is inactive
    Target(IdentityId),

    /// No relationship with this id (in an addressable status)
    Relationship(RelationshipId),

    /// No addressable relationship between the two identities
    Pair(IdentityId, IdentityId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Initiator(id) => write!(f, "initiator identity {id}"),
            Missing::Target(id) => write!(f, "target identity {id}"),
            Missing::Relationship(id) => write!(f, "relationship {id}"),
            Missing::Pair(a, b) => write!(f, "relationship between {a} and {b}"),
        }
    }
}

/// Errors returned by every public service operation
///
/// Business-rule no-ops (already friends, already pending) are not errors;
/// they come back as [`crate::Notice`] values.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input rejected before touching any collaborator
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identity or relationship absent
    #[error("Not found: {0}")]
    NotFound(Missing),

    /// Collaborator failure; the underlying error is kept as the source
    #[error("Server error: {message}")]
    Server {
        /// What the service was doing
        message: String,
        /// Underlying collaborator error, if any
        #[source]
        source: Option<BoxError>,
    },
}

impl ServiceError {
    /// Wrap a collaborator error
    pub fn server<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ServiceError::Server {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A server-side failure with no underlying error value
    pub fn server_msg(message: impl Into<String>) -> Self {
        ServiceError::Server {
            message: message.into(),
            source: None,
        }
    }

    /// Classification for the presentation layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Server { .. } => ErrorKind::Server,
        }
    }

    /// Optional diagnostic detail (the collaborator error's message)
    pub fn details(&self) -> Option<String> {
        match self {
            ServiceError::Server {
                source: Some(source),
                ..
            } => Some(source.to_string()),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
