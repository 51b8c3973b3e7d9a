//! Read-only relationship queries

use crate::log::report;
use crate::{OutcomeLog, RelationshipService, ServiceError, ServiceResult};
use kinship_domain::traits::{IdentityDirectory, RelationshipStore};
use kinship_domain::{
    IdentityId, MutualRow, Pair, Relationship, RelationshipId, RelationshipStatus, Side,
};

/// Which pending requests to list for an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDirection {
    /// Requests others sent to the identity
    Incoming,

    /// Requests the identity sent
    Outgoing,
}

impl PendingDirection {
    fn side(self) -> Side {
        match self {
            PendingDirection::Incoming => Side::Target,
            PendingDirection::Outgoing => Side::Initiator,
        }
    }
}

impl<S, D, L> RelationshipService<S, D, L>
where
    S: RelationshipStore,
    D: IdentityDirectory,
    L: OutcomeLog,
{
    /// Accepted relationships of `identity`
    ///
    /// With the default [`crate::FriendListScope::Both`] a friendship shows
    /// up for both parties; the `Initiated` scope lists only the ones
    /// `identity` asked for.
    pub fn list_by_user(&self, identity: IdentityId) -> ServiceResult<Vec<Relationship>> {
        let side = self.config.friend_list_side();
        let result = self
            .store
            .list_by_status(identity, RelationshipStatus::Accepted, side)
            .map_err(|e| ServiceError::server("listing friends", e));
        report(&self.log, "list_by_user", result)
    }

    /// `a`'s accepted relationships with every identity that is also an
    /// accepted friend of `b`
    ///
    /// Rows missing a status or an update time are filled in as accepted,
    /// updated at creation.
    pub fn list_mutual(&self, a: IdentityId, b: IdentityId) -> ServiceResult<Vec<Relationship>> {
        report(&self.log, "list_mutual", self.try_list_mutual(a, b))
    }

    /// Identities that are accepted friends of both `a` and `b`
    pub fn mutual_friend_ids(&self, a: IdentityId, b: IdentityId) -> ServiceResult<Vec<IdentityId>> {
        let result = self.try_list_mutual(a, b).map(|records| {
            records
                .iter()
                .filter_map(|r| r.other_party(a))
                .collect()
        });
        report(&self.log, "mutual_friend_ids", result)
    }

    /// Fetch one relationship by id, whatever its status
    pub fn get_by_id(&self, id: RelationshipId) -> ServiceResult<Option<Relationship>> {
        let result = self
            .store
            .find_by_id(id)
            .map_err(|e| ServiceError::server("fetching relationship", e));
        report(&self.log, "get_by_id", result)
    }

    /// Pending requests to or from `identity`, oldest first
    pub fn list_pending(
        &self,
        identity: IdentityId,
        direction: PendingDirection,
    ) -> ServiceResult<Vec<Relationship>> {
        let result = self
            .store
            .list_by_status(identity, RelationshipStatus::Pending, direction.side())
            .map_err(|e| ServiceError::server("listing pending requests", e));
        report(&self.log, "list_pending", result)
    }

    fn try_list_mutual(&self, a: IdentityId, b: IdentityId) -> ServiceResult<Vec<Relationship>> {
        Pair::new(a, b)?;
        let rows = self
            .store
            .mutual_accepted(a, b)
            .map_err(|e| ServiceError::server("listing mutual friends", e))?;
        Ok(rows.into_iter().map(normalize).collect())
    }
}

fn normalize(row: MutualRow) -> Relationship {
    let status = row
        .status
        .as_deref()
        .and_then(RelationshipStatus::parse)
        .unwrap_or(RelationshipStatus::Accepted);

    Relationship {
        id: row.id,
        initiator: row.initiator,
        target: row.target,
        status,
        created_at: row.created_at,
        updated_at: Some(row.updated_at.unwrap_or(row.created_at)),
    }
}
