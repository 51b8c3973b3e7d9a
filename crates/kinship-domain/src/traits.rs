//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the relationship lifecycle
//! and infrastructure. Implementations live in other crates
//! (kinship-store for SQLite).

use std::sync::Arc;

use crate::{
    IdentityId, MutualRow, NewRelationship, Relationship, RelationshipId, RelationshipStatus,
    Side,
};

/// Classification every store error must offer
///
/// The lifecycle service needs to tell a lost insert race (unique pair
/// constraint) apart from infrastructure failure.
pub trait StoreFailure: std::error::Error + Send + Sync + 'static {
    /// Whether the failure is a uniqueness/constraint conflict
    fn is_conflict(&self) -> bool;
}

/// Answers whether an identity exists and is active
///
/// Implemented by whatever owns user accounts; kinship-store ships a
/// SQLite-backed registry.
pub trait IdentityDirectory {
    /// Error type for directory lookups
    type Error: std::error::Error + Send + Sync + 'static;

    /// True when the identity exists and is active
    fn identity_exists(&self, id: IdentityId) -> Result<bool, Self::Error>;
}

/// Trait for storing and retrieving relationship records
///
/// Methods take `&self` so one store can serve concurrent callers; the
/// implementation owns its synchronization.
pub trait RelationshipStore {
    /// Error type for store operations
    type Error: StoreFailure;

    /// Find the record for the unordered pair, checking both orderings
    fn find_by_pair(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Option<Relationship>, Self::Error>;

    /// Find the record for the unordered pair if its status is one of `statuses`
    fn find_by_pair_with_status(
        &self,
        a: IdentityId,
        b: IdentityId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error>;

    /// Get a record by id
    fn find_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error>;

    /// Get a record by id if its status is one of `statuses`
    fn find_by_id_with_status(
        &self,
        id: RelationshipId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error>;

    /// Insert a new pending record, assigning its id
    ///
    /// Fails with a conflict (`StoreFailure::is_conflict`) when the pair
    /// already holds a record.
    fn insert(&self, record: NewRelationship) -> Result<Relationship, Self::Error>;

    /// Atomically delete the rejected record `stale` and insert `record`
    ///
    /// Either both steps happen or neither does. Fails with a conflict when
    /// `stale` is no longer a rejected record (another caller got there
    /// first).
    fn replace(
        &self,
        stale: RelationshipId,
        record: NewRelationship,
    ) -> Result<Relationship, Self::Error>;

    /// Move a pending record to `status`, stamping the update time
    ///
    /// Only `Pending` rows move; returns false when no pending row matched,
    /// so two racing answers cannot both apply.
    fn update_status(
        &self,
        id: RelationshipId,
        status: RelationshipStatus,
        updated_at: u64,
    ) -> Result<bool, Self::Error>;

    /// Delete a record; false when no row matched
    fn delete(&self, id: RelationshipId) -> Result<bool, Self::Error>;

    /// Records with `status` where `identity` occupies `side`
    fn list_by_status(
        &self,
        identity: IdentityId,
        status: RelationshipStatus,
        side: Side,
    ) -> Result<Vec<Relationship>, Self::Error>;

    /// `a`'s accepted records with every identity that is also an accepted
    /// friend of `b`
    fn mutual_accepted(&self, a: IdentityId, b: IdentityId)
        -> Result<Vec<MutualRow>, Self::Error>;
}

impl<T: IdentityDirectory + ?Sized> IdentityDirectory for Arc<T> {
    type Error = T::Error;

    fn identity_exists(&self, id: IdentityId) -> Result<bool, Self::Error> {
        (**self).identity_exists(id)
    }
}

impl<T: RelationshipStore + ?Sized> RelationshipStore for Arc<T> {
    type Error = T::Error;

    fn find_by_pair(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Option<Relationship>, Self::Error> {
        (**self).find_by_pair(a, b)
    }

    fn find_by_pair_with_status(
        &self,
        a: IdentityId,
        b: IdentityId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        (**self).find_by_pair_with_status(a, b, statuses)
    }

    fn find_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        (**self).find_by_id(id)
    }

    fn find_by_id_with_status(
        &self,
        id: RelationshipId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        (**self).find_by_id_with_status(id, statuses)
    }

    fn insert(&self, record: NewRelationship) -> Result<Relationship, Self::Error> {
        (**self).insert(record)
    }

    fn replace(
        &self,
        stale: RelationshipId,
        record: NewRelationship,
    ) -> Result<Relationship, Self::Error> {
        (**self).replace(stale, record)
    }

    fn update_status(
        &self,
        id: RelationshipId,
        status: RelationshipStatus,
        updated_at: u64,
    ) -> Result<bool, Self::Error> {
        (**self).update_status(id, status, updated_at)
    }

    fn delete(&self, id: RelationshipId) -> Result<bool, Self::Error> {
        (**self).delete(id)
    }

    fn list_by_status(
        &self,
        identity: IdentityId,
        status: RelationshipStatus,
        side: Side,
    ) -> Result<Vec<Relationship>, Self::Error> {
        (**self).list_by_status(identity, status, side)
    }

    fn mutual_accepted(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Vec<MutualRow>, Self::Error> {
        (**self).mutual_accepted(a, b)
    }
}
