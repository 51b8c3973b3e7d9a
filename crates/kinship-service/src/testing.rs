//! In-memory collaborators for unit tests

use crate::{ErrorKind, OutcomeLog, ServiceError};
use kinship_domain::traits::{IdentityDirectory, RelationshipStore, StoreFailure};
use kinship_domain::{
    IdentityId, MutualRow, NewRelationship, Pair, Relationship, RelationshipId,
    RelationshipStatus, Side,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// Change made by a simulated concurrent caller
pub(crate) type Interleave = Box<dyn FnOnce(&mut Vec<Relationship>) + Send>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum MockError {
    #[error("conflict")]
    Conflict,
    #[error("injected failure")]
    Injected,
}

impl StoreFailure for MockError {
    fn is_conflict(&self) -> bool {
        matches!(self, MockError::Conflict)
    }
}

/// In-memory store with failure injection
#[derive(Default)]
pub(crate) struct MockStore {
    pub records: Mutex<Vec<Relationship>>,
    /// Canned answer for `mutual_accepted`
    pub mutual_rows: Vec<MutualRow>,
    pub fail_lookups: bool,
    pub fail_writes: bool,
    pub delete_reports_nothing: bool,
    /// `update_status` matches nothing and leaves the row alone
    pub update_reports_nothing: bool,
    /// Applied one per write (insert, replace, update_status) before the
    /// write itself, simulating another caller winning a race
    pub interleaved: Mutex<VecDeque<Interleave>>,
    pub inserts: Mutex<usize>,
}

impl MockStore {
    pub fn with(records: Vec<Relationship>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// Queue a concurrent change for the next write
    pub fn interleave(&self, change: impl FnOnce(&mut Vec<Relationship>) + Send + 'static) {
        self.interleaved.lock().unwrap().push_back(Box::new(change));
    }

    fn run_interleaved(&self, records: &mut Vec<Relationship>) {
        if let Some(change) = self.interleaved.lock().unwrap().pop_front() {
            change(records);
        }
    }

    pub fn all(&self) -> Vec<Relationship> {
        self.records.lock().unwrap().clone()
    }

    fn lookup(&self) -> Result<(), MockError> {
        if self.fail_lookups {
            Err(MockError::Injected)
        } else {
            Ok(())
        }
    }

    fn write(&self) -> Result<(), MockError> {
        if self.fail_writes {
            Err(MockError::Injected)
        } else {
            Ok(())
        }
    }

    fn push(
        &self,
        records: &mut Vec<Relationship>,
        record: NewRelationship,
    ) -> Result<Relationship, MockError> {
        let pair = Pair::new(record.initiator, record.target).unwrap();
        if records.iter().any(|r| r.pair() == pair) {
            return Err(MockError::Conflict);
        }
        *self.inserts.lock().unwrap() += 1;
        let created = record.into_relationship(RelationshipId::new());
        records.push(created.clone());
        Ok(created)
    }
}

impl RelationshipStore for MockStore {
    type Error = MockError;

    fn find_by_pair(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Option<Relationship>, Self::Error> {
        self.lookup()?;
        Ok(self
            .all()
            .into_iter()
            .find(|r| r.involves(a) && r.involves(b)))
    }

    fn find_by_pair_with_status(
        &self,
        a: IdentityId,
        b: IdentityId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        Ok(self
            .find_by_pair(a, b)?
            .filter(|r| statuses.contains(&r.status)))
    }

    fn find_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        self.lookup()?;
        Ok(self.all().into_iter().find(|r| r.id == id))
    }

    fn find_by_id_with_status(
        &self,
        id: RelationshipId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        Ok(self.find_by_id(id)?.filter(|r| statuses.contains(&r.status)))
    }

    fn insert(&self, record: NewRelationship) -> Result<Relationship, Self::Error> {
        self.write()?;
        let mut records = self.records.lock().unwrap();
        self.run_interleaved(&mut records);
        self.push(&mut records, record)
    }

    fn replace(
        &self,
        stale: RelationshipId,
        record: NewRelationship,
    ) -> Result<Relationship, Self::Error> {
        self.write()?;
        let mut records = self.records.lock().unwrap();
        self.run_interleaved(&mut records);
        let before = records.len();
        records.retain(|r| !(r.id == stale && r.status == RelationshipStatus::Rejected));
        if records.len() == before {
            return Err(MockError::Conflict);
        }
        self.push(&mut records, record)
    }

    fn update_status(
        &self,
        id: RelationshipId,
        status: RelationshipStatus,
        updated_at: u64,
    ) -> Result<bool, Self::Error> {
        self.write()?;
        let mut records = self.records.lock().unwrap();
        self.run_interleaved(&mut records);
        if self.update_reports_nothing {
            return Ok(false);
        }
        match records
            .iter_mut()
            .find(|r| r.id == id && r.status == RelationshipStatus::Pending)
        {
            Some(r) => {
                r.status = status;
                r.updated_at = Some(updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: RelationshipId) -> Result<bool, Self::Error> {
        self.write()?;
        if self.delete_reports_nothing {
            return Ok(false);
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    fn list_by_status(
        &self,
        identity: IdentityId,
        status: RelationshipStatus,
        side: Side,
    ) -> Result<Vec<Relationship>, Self::Error> {
        self.lookup()?;
        Ok(self
            .all()
            .into_iter()
            .filter(|r| r.status == status)
            .filter(|r| match side {
                Side::Initiator => r.initiator == identity,
                Side::Target => r.target == identity,
                Side::Either => r.involves(identity),
            })
            .collect())
    }

    fn mutual_accepted(
        &self,
        _a: IdentityId,
        _b: IdentityId,
    ) -> Result<Vec<MutualRow>, Self::Error> {
        self.lookup()?;
        Ok(self.mutual_rows.clone())
    }
}

/// Identity directory backed by a fixed set of ids
pub(crate) struct MockDirectory {
    pub known: HashSet<i64>,
    pub fail: bool,
}

impl MockDirectory {
    pub fn with(ids: &[i64]) -> Self {
        Self {
            known: ids.iter().copied().collect(),
            fail: false,
        }
    }
}

impl IdentityDirectory for MockDirectory {
    type Error = MockError;

    fn identity_exists(&self, id: IdentityId) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockError::Injected);
        }
        Ok(self.known.contains(&id.value()))
    }
}

/// Log that remembers `(level, operation, kind)` for each failure
#[derive(Default)]
pub(crate) struct RecordingLog {
    pub entries: Mutex<Vec<(&'static str, &'static str, ErrorKind)>>,
}

impl OutcomeLog for RecordingLog {
    fn warn(&self, operation: &'static str, error: &ServiceError) {
        self.entries
            .lock()
            .unwrap()
            .push(("warn", operation, error.kind()));
    }

    fn error(&self, operation: &'static str, error: &ServiceError) {
        self.entries
            .lock()
            .unwrap()
            .push(("error", operation, error.kind()));
    }
}

pub(crate) fn ident(v: i64) -> IdentityId {
    IdentityId::new(v).unwrap()
}

/// A stored record in `status`; answered records carry an update time
pub(crate) fn record(initiator: i64, target: i64, status: RelationshipStatus) -> Relationship {
    let mut r = NewRelationship::pending(ident(initiator), ident(target))
        .into_relationship(RelationshipId::new());
    r.status = status;
    if status != RelationshipStatus::Pending {
        r.updated_at = Some(r.created_at + 5);
    }
    r
}
