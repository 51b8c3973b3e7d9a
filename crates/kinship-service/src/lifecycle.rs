//! Relationship lifecycle: request, accept, reject, delete

use crate::log::report;
use crate::{
    LifecycleConfig, Missing, Notice, OutcomeLog, Reply, ServiceError, ServiceResult,
    TracingOutcomeLog,
};
use kinship_domain::traits::{IdentityDirectory, RelationshipStore, StoreFailure};
use kinship_domain::{
    current_millis, IdentityId, NewRelationship, Pair, Relationship, RelationshipId,
    RelationshipStatus, StatusChange, ACTIVE_STATUSES,
};

/// Relationship lifecycle service and query facade
///
/// Holds no mutable state: every operation takes `&self`, so one service
/// can be shared between threads when its collaborators allow it.
///
/// # Examples
///
/// ```no_run
/// use kinship_domain::IdentityId;
/// use kinship_service::RelationshipService;
/// use kinship_store::SqliteStore;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(SqliteStore::open("kinship.db")?);
/// let service = RelationshipService::new(store.clone(), store);
///
/// let reply = service.create_request(IdentityId::new(1)?, IdentityId::new(2)?)?;
/// println!("created: {}", reply.is_created());
/// # Ok(())
/// # }
/// ```
pub struct RelationshipService<S, D, L = TracingOutcomeLog> {
    pub(crate) store: S,
    pub(crate) directory: D,
    pub(crate) log: L,
    pub(crate) config: LifecycleConfig,
}

impl<S, D> RelationshipService<S, D>
where
    S: RelationshipStore,
    D: IdentityDirectory,
{
    /// Create a service with default configuration and tracing-backed logging
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store,
            directory,
            log: TracingOutcomeLog,
            config: LifecycleConfig::default(),
        }
    }
}

impl<S, D, L> RelationshipService<S, D, L>
where
    S: RelationshipStore,
    D: IdentityDirectory,
    L: OutcomeLog,
{
    /// Replace the configuration
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the outcome log
    pub fn with_log<L2: OutcomeLog>(self, log: L2) -> RelationshipService<S, D, L2> {
        RelationshipService {
            store: self.store,
            directory: self.directory,
            log,
            config: self.config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Send a relationship request from `initiator` to `target`
    ///
    /// Returns `Reply::Created` with the new pending record, or
    /// `Reply::Info` when the pair already holds a live record:
    /// - accepted: [`Notice::AlreadyFriends`]
    /// - pending, sent by `target`: [`Notice::RequestPendingFromThem`]
    /// - pending, sent by `initiator`: [`Notice::RequestAlreadyPending`]
    ///
    /// A rejected record is replaced by a fresh pending one with a new id.
    pub fn create_request(
        &self,
        initiator: IdentityId,
        target: IdentityId,
    ) -> ServiceResult<Reply<Relationship>> {
        report(&self.log, "create_request", self.try_create(initiator, target))
    }

    /// Accept a pending request
    ///
    /// Answering an already answered request is a no-op notice. If a
    /// concurrent answer lands between the read and the update, the notice
    /// reports the status that won.
    pub fn accept_request(&self, id: RelationshipId) -> ServiceResult<Notice> {
        report(
            &self.log,
            "accept_request",
            self.answer(id, RelationshipStatus::Accepted),
        )
    }

    /// Reject a pending request; same idempotence as [`Self::accept_request`]
    pub fn reject_request(&self, id: RelationshipId) -> ServiceResult<Notice> {
        report(
            &self.log,
            "reject_request",
            self.answer(id, RelationshipStatus::Rejected),
        )
    }

    /// Delete the pending or accepted relationship between two identities
    ///
    /// Rejected records are not addressable here; they only disappear
    /// through resurrection.
    pub fn delete_by_pair(&self, a: IdentityId, b: IdentityId) -> ServiceResult<()> {
        report(&self.log, "delete_by_pair", self.try_delete_by_pair(a, b))
    }

    /// Delete a pending or accepted relationship by id
    pub fn delete_by_id(&self, id: RelationshipId) -> ServiceResult<()> {
        report(&self.log, "delete_by_id", self.try_delete_by_id(id))
    }

    fn try_create(
        &self,
        initiator: IdentityId,
        target: IdentityId,
    ) -> ServiceResult<Reply<Relationship>> {
        Pair::new(initiator, target)?;
        self.require_identity(initiator, Missing::Initiator(initiator))?;
        self.require_identity(target, Missing::Target(target))?;

        let existing = self
            .store
            .find_by_pair(initiator, target)
            .map_err(|e| ServiceError::server("looking up relationship pair", e))?;

        match existing {
            None => self.insert_pending(initiator, target),
            Some(record) if record.status == RelationshipStatus::Rejected => {
                self.resurrect(record, initiator, target, true)
            }
            Some(record) => {
                tracing::debug!(id = %record.id, status = %record.status, "relationship already exists");
                Ok(Reply::Info(existing_notice(&record, initiator)))
            }
        }
    }

    fn require_identity(&self, id: IdentityId, missing: Missing) -> ServiceResult<()> {
        let exists = self
            .directory
            .identity_exists(id)
            .map_err(|e| ServiceError::server(format!("checking identity {id}"), e))?;
        if exists {
            Ok(())
        } else {
            Err(ServiceError::NotFound(missing))
        }
    }

    fn insert_pending(
        &self,
        initiator: IdentityId,
        target: IdentityId,
    ) -> ServiceResult<Reply<Relationship>> {
        match self.store.insert(NewRelationship::pending(initiator, target)) {
            Ok(created) => {
                tracing::info!(id = %created.id, %initiator, %target, "relationship requested");
                Ok(Reply::Created(created))
            }
            Err(e) if e.is_conflict() => self.after_conflict(initiator, target, e, true),
            Err(e) => Err(ServiceError::server("creating relationship", e)),
        }
    }

    /// Replace the rejected `stale` record with a fresh pending one.
    /// `retry` allows one more attempt if a concurrent caller left another
    /// rejected record in its place.
    fn resurrect(
        &self,
        stale: Relationship,
        initiator: IdentityId,
        target: IdentityId,
        retry: bool,
    ) -> ServiceResult<Reply<Relationship>> {
        match self
            .store
            .replace(stale.id, NewRelationship::pending(initiator, target))
        {
            Ok(created) => {
                tracing::info!(
                    stale = %stale.id,
                    id = %created.id,
                    %initiator,
                    %target,
                    "rejected relationship requested again"
                );
                Ok(Reply::Created(created))
            }
            Err(e) if e.is_conflict() => self.after_conflict(initiator, target, e, retry),
            Err(e) => Err(ServiceError::server("replacing rejected relationship", e)),
        }
    }

    /// Another caller wrote the pair between our lookup and our write.
    ///
    /// The pair is re-read once. A pending or accepted winner yields the
    /// notice a sequential caller would get. A rejected winner is resurrected
    /// once more when `retry` allows. An empty pair, or a rejected record
    /// after the retry is spent, is a server error.
    fn after_conflict<E: StoreFailure>(
        &self,
        initiator: IdentityId,
        target: IdentityId,
        conflict: E,
        retry: bool,
    ) -> ServiceResult<Reply<Relationship>> {
        let winner = self
            .store
            .find_by_pair(initiator, target)
            .map_err(|e| ServiceError::server("re-reading relationship pair", e))?;

        match winner {
            Some(record) if record.status != RelationshipStatus::Rejected => {
                tracing::debug!(id = %record.id, "lost relationship insert race");
                Ok(Reply::Info(existing_notice(&record, initiator)))
            }
            Some(record) if retry => {
                tracing::debug!(id = %record.id, "pair rejected concurrently, resurrecting again");
                self.resurrect(record, initiator, target, false)
            }
            _ => Err(ServiceError::server(
                "relationship pair changed concurrently",
                conflict,
            )),
        }
    }

    fn answer(&self, id: RelationshipId, requested: RelationshipStatus) -> ServiceResult<Notice> {
        let record = self.find_required(id)?;

        match record.status.apply(requested) {
            StatusChange::Unchanged(status) => {
                tracing::debug!(%id, %status, "relationship already answered");
                Ok(Notice::unchanged(status))
            }
            StatusChange::Transition(to) => {
                let updated = self
                    .store
                    .update_status(id, to, current_millis())
                    .map_err(|e| ServiceError::server("updating relationship status", e))?;

                if updated {
                    tracing::info!(%id, status = %to, "relationship answered");
                    return Ok(Notice::answered(to));
                }

                // No pending row matched: a concurrent answer or delete won
                match self.find_required(id)?.status {
                    RelationshipStatus::Pending => Err(ServiceError::server_msg(format!(
                        "relationship {id} could not be updated"
                    ))),
                    status => Ok(Notice::unchanged(status)),
                }
            }
        }
    }

    fn find_required(&self, id: RelationshipId) -> ServiceResult<Relationship> {
        self.store
            .find_by_id(id)
            .map_err(|e| ServiceError::server("fetching relationship", e))?
            .ok_or(ServiceError::NotFound(Missing::Relationship(id)))
    }

    fn try_delete_by_pair(&self, a: IdentityId, b: IdentityId) -> ServiceResult<()> {
        Pair::new(a, b)?;
        let record = self
            .store
            .find_by_pair_with_status(a, b, &ACTIVE_STATUSES)
            .map_err(|e| ServiceError::server("looking up relationship pair", e))?
            .ok_or(ServiceError::NotFound(Missing::Pair(a, b)))?;
        self.remove(record)
    }

    fn try_delete_by_id(&self, id: RelationshipId) -> ServiceResult<()> {
        let record = self
            .store
            .find_by_id_with_status(id, &ACTIVE_STATUSES)
            .map_err(|e| ServiceError::server("fetching relationship", e))?
            .ok_or(ServiceError::NotFound(Missing::Relationship(id)))?;
        self.remove(record)
    }

    fn remove(&self, record: Relationship) -> ServiceResult<()> {
        let removed = self
            .store
            .delete(record.id)
            .map_err(|e| ServiceError::server("deleting relationship", e))?;
        if !removed {
            return Err(ServiceError::server_msg(format!(
                "delete of relationship {} affected no rows",
                record.id
            )));
        }
        tracing::info!(id = %record.id, status = %record.status, "relationship deleted");
        Ok(())
    }
}

/// Notice for a live (pending or accepted) record found when `initiator`
/// asks again
fn existing_notice(record: &Relationship, initiator: IdentityId) -> Notice {
    match record.status {
        RelationshipStatus::Accepted => Notice::AlreadyFriends,
        RelationshipStatus::Pending if record.target == initiator => {
            Notice::RequestPendingFromThem
        }
        RelationshipStatus::Pending => Notice::RequestAlreadyPending,
        RelationshipStatus::Rejected => Notice::AlreadyRejected,
    }
}
