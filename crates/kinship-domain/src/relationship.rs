//! Relationship module - a directed request between two identities

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{DomainError, IdentityId, RelationshipId, RelationshipStatus};

/// Current time in milliseconds since the Unix epoch
pub fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Unordered pair of distinct identities
///
/// The natural key of a relationship: `Pair::new(a, b) == Pair::new(b, a)`.
/// The store keys its uniqueness index on `(low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    low: IdentityId,
    high: IdentityId,
}

impl Pair {
    /// Normalize two identities into a pair
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::{IdentityId, Pair};
    ///
    /// let a = IdentityId::new(9).unwrap();
    /// let b = IdentityId::new(3).unwrap();
    /// assert_eq!(Pair::new(a, b).unwrap(), Pair::new(b, a).unwrap());
    /// assert!(Pair::new(a, a).is_err());
    /// ```
    pub fn new(a: IdentityId, b: IdentityId) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfRelationship(a));
        }
        Ok(if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        })
    }

    /// Smaller identity of the pair
    pub fn low(&self) -> IdentityId {
        self.low
    }

    /// Larger identity of the pair
    pub fn high(&self) -> IdentityId {
        self.high
    }

    /// Whether the identity is one of the two members
    pub fn contains(&self, id: IdentityId) -> bool {
        self.low == id || self.high == id
    }
}

/// Which side of a relationship an identity must occupy in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The identity sent the request
    Initiator,

    /// The identity received the request
    Target,

    /// Either side
    Either,
}

/// A relationship record between two identities
///
/// Direction matters for semantics (who asked whom) but not for existence:
/// at most one record exists per [`Pair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Store-assigned identifier
    pub id: RelationshipId,

    /// Identity that sent the request
    pub initiator: IdentityId,

    /// Identity that received the request
    pub target: IdentityId,

    /// Current lifecycle status
    pub status: RelationshipStatus,

    /// Creation time (ms since epoch)
    pub created_at: u64,

    /// Time of the last status transition, absent until the first one
    pub updated_at: Option<u64>,
}

impl Relationship {
    /// The unordered pair this record occupies
    pub fn pair(&self) -> Pair {
        if self.initiator < self.target {
            Pair { low: self.initiator, high: self.target }
        } else {
            Pair { low: self.target, high: self.initiator }
        }
    }

    /// Whether the identity is the initiator or the target
    pub fn involves(&self, id: IdentityId) -> bool {
        self.initiator == id || self.target == id
    }

    /// The member of the pair that is not `id`
    pub fn other_party(&self, id: IdentityId) -> Option<IdentityId> {
        if self.initiator == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.initiator)
        } else {
            None
        }
    }
}

/// A relationship not yet persisted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationship {
    /// Identity that sent the request
    pub initiator: IdentityId,

    /// Identity that received the request
    pub target: IdentityId,

    /// Creation time (ms since epoch)
    pub created_at: u64,
}

impl NewRelationship {
    /// A fresh pending request, stamped now
    pub fn pending(initiator: IdentityId, target: IdentityId) -> Self {
        Self {
            initiator,
            target,
            created_at: current_millis(),
        }
    }

    /// The record the store materializes from this request
    pub fn into_relationship(self, id: RelationshipId) -> Relationship {
        Relationship {
            id,
            initiator: self.initiator,
            target: self.target,
            status: RelationshipStatus::Pending,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Raw row produced by the store's mutual-friends intersection
///
/// Status and update time are loosely typed because the intersection runs
/// over a derived view; the query facade normalizes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutualRow {
    /// Relationship identifier
    pub id: RelationshipId,

    /// Identity that sent the request
    pub initiator: IdentityId,

    /// Identity that received the request
    pub target: IdentityId,

    /// Stored status name, if the row carried one
    pub status: Option<String>,

    /// Creation time (ms since epoch)
    pub created_at: u64,

    /// Last transition time, if any
    pub updated_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(v: i64) -> IdentityId {
        IdentityId::new(v).unwrap()
    }

    fn record(initiator: i64, target: i64) -> Relationship {
        NewRelationship::pending(ident(initiator), ident(target))
            .into_relationship(RelationshipId::new())
    }

    #[test]
    fn test_pair_rejects_self() {
        let err = Pair::new(ident(5), ident(5)).unwrap_err();
        assert_eq!(err, DomainError::SelfRelationship(ident(5)));
    }

    #[test]
    fn test_relationship_pair_matches_pair_new() {
        let r = record(8, 2);
        assert_eq!(r.pair(), Pair::new(ident(2), ident(8)).unwrap());
        assert_eq!(r.pair().low(), ident(2));
        assert_eq!(r.pair().high(), ident(8));
    }

    #[test]
    fn test_other_party() {
        let r = record(1, 2);
        assert_eq!(r.other_party(ident(1)), Some(ident(2)));
        assert_eq!(r.other_party(ident(2)), Some(ident(1)));
        assert_eq!(r.other_party(ident(3)), None);
        assert!(r.involves(ident(2)));
        assert!(!r.involves(ident(3)));
    }

    #[test]
    fn test_new_relationship_starts_pending() {
        let r = record(1, 2);
        assert_eq!(r.status, RelationshipStatus::Pending);
        assert_eq!(r.updated_at, None);
        assert!(r.created_at > 0);
    }
}
