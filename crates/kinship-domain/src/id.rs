//! Identifiers for relationships and the identities they connect

use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Unique identifier for a relationship record, based on UUIDv7
///
/// Assigned by the store when a record is inserted. UUIDv7 gives:
/// - Chronological sortability (a resurrected record always sorts after
///   the record it replaced)
/// - 128-bit uniqueness without coordination between writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipId(u128);

impl RelationshipId {
    /// Generate a new UUIDv7-based RelationshipId
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::RelationshipId;
    ///
    /// let id = RelationshipId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RelationshipId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RelationshipId from its hyphenated UUID form
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::RelationshipId;
    ///
    /// let id = RelationshipId::new();
    /// let parsed = RelationshipId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| DomainError::InvalidRelationshipId(format!("{s:?}: {e}")))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Big-endian bytes, the storage representation
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Rebuild an id from its storage bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            DomainError::InvalidRelationshipId(format!(
                "expected 16 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(u128::from_be_bytes(arr)))
    }

    /// Timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl FromStr for RelationshipId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Reference to an identity (a user account) owned by the identity service
///
/// Identities are positive integers; zero and negative values never name an
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityId(i64);

impl IdentityId {
    /// Create an IdentityId, rejecting non-positive values
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidIdentity(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Raw integer value, as stored
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdentityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIdentity(s.to_string()))?;
        Self::new(value)
    }
}
