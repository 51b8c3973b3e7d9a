//! RelationshipStore implementation

use crate::{SqliteStore, StoreError};
use kinship_domain::traits::RelationshipStore;
use kinship_domain::{
    IdentityId, MutualRow, NewRelationship, Pair, Relationship, RelationshipId,
    RelationshipStatus, Side,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

const COLUMNS: &str = "id, initiator_id, target_id, status, created_at, updated_at";

fn conversion_error<E>(column: usize, ty: Type, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(err))
}

fn read_id(row: &Row<'_>, column: usize) -> rusqlite::Result<RelationshipId> {
    let bytes: Vec<u8> = row.get(column)?;
    RelationshipId::from_bytes(&bytes).map_err(|e| conversion_error(column, Type::Blob, e))
}

fn read_identity(row: &Row<'_>, column: usize) -> rusqlite::Result<IdentityId> {
    let raw: i64 = row.get(column)?;
    IdentityId::new(raw).map_err(|e| conversion_error(column, Type::Integer, e))
}

fn row_to_relationship(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    let status_str: String = row.get(3)?;
    let status = RelationshipStatus::parse(&status_str).ok_or_else(|| {
        conversion_error(
            3,
            Type::Text,
            StoreError::InvalidData(format!("Unknown relationship status: {}", status_str)),
        )
    })?;
    let updated_at: Option<i64> = row.get(5)?;

    Ok(Relationship {
        id: read_id(row, 0)?,
        initiator: read_identity(row, 1)?,
        target: read_identity(row, 2)?,
        status,
        created_at: row.get::<_, i64>(4)? as u64,
        updated_at: updated_at.map(|t| t as u64),
    })
}

fn status_placeholders(first: usize, statuses: &[RelationshipStatus]) -> String {
    (0..statuses.len())
        .map(|i| format!("?{}", first + i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_row(conn: &Connection, record: NewRelationship) -> Result<Relationship, StoreError> {
    let id = RelationshipId::new();
    // pair columns are computed in SQL so the CHECK constraints see the raw
    // identities, including a self-relationship
    conn.execute(
        "INSERT INTO relationships
             (id, initiator_id, target_id, pair_low, pair_high, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, min(?2, ?3), max(?2, ?3), ?4, ?5, NULL)",
        params![
            id.to_bytes().to_vec(),
            record.initiator.value(),
            record.target.value(),
            RelationshipStatus::Pending.as_str(),
            record.created_at as i64,
        ],
    )
    .map_err(StoreError::from_write)?;

    Ok(record.into_relationship(id))
}

impl SqliteStore {
    fn query_one(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Option<Relationship>, StoreError> {
        let conn = self.lock()?;
        let record = conn.query_row(sql, params, row_to_relationship).optional()?;
        Ok(record)
    }
}

impl RelationshipStore for SqliteStore {
    type Error = StoreError;

    fn find_by_pair(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Option<Relationship>, Self::Error> {
        // A self pair can never be stored
        let Ok(pair) = Pair::new(a, b) else {
            return Ok(None);
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM relationships WHERE pair_low = ?1 AND pair_high = ?2"
        );
        self.query_one(&sql, &[&pair.low().value(), &pair.high().value()])
    }

    fn find_by_pair_with_status(
        &self,
        a: IdentityId,
        b: IdentityId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        let Ok(pair) = Pair::new(a, b) else {
            return Ok(None);
        };
        if statuses.is_empty() {
            return Ok(None);
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM relationships
             WHERE pair_low = ?1 AND pair_high = ?2 AND status IN ({})",
            status_placeholders(3, statuses)
        );
        let low = pair.low().value();
        let high = pair.high().value();
        let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let mut params: Vec<&dyn ToSql> = vec![&low, &high];
        params.extend(names.iter().map(|n| n as &dyn ToSql));
        self.query_one(&sql, &params)
    }

    fn find_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        let sql = format!("SELECT {COLUMNS} FROM relationships WHERE id = ?1");
        self.query_one(&sql, &[&id.to_bytes().to_vec()])
    }

    fn find_by_id_with_status(
        &self,
        id: RelationshipId,
        statuses: &[RelationshipStatus],
    ) -> Result<Option<Relationship>, Self::Error> {
        if statuses.is_empty() {
            return Ok(None);
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM relationships WHERE id = ?1 AND status IN ({})",
            status_placeholders(2, statuses)
        );
        let id_bytes = id.to_bytes().to_vec();
        let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let mut params: Vec<&dyn ToSql> = vec![&id_bytes];
        params.extend(names.iter().map(|n| n as &dyn ToSql));
        self.query_one(&sql, &params)
    }

    fn insert(&self, record: NewRelationship) -> Result<Relationship, Self::Error> {
        let conn = self.lock()?;
        let created = insert_row(&conn, record)?;
        tracing::debug!(id = %created.id, "relationship inserted");
        Ok(created)
    }

    fn replace(
        &self,
        stale: RelationshipId,
        record: NewRelationship,
    ) -> Result<Relationship, Self::Error> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let removed = tx.execute(
            "DELETE FROM relationships WHERE id = ?1 AND status = ?2",
            params![stale.to_bytes().to_vec(), RelationshipStatus::Rejected.as_str()],
        )?;
        if removed == 0 {
            // Someone else already replaced or removed it; dropping the
            // transaction rolls it back
            return Err(StoreError::Conflict(format!(
                "rejected relationship {} no longer present",
                stale
            )));
        }

        let created = insert_row(&tx, record)?;
        tx.commit()?;
        tracing::debug!(stale = %stale, id = %created.id, "rejected relationship replaced");
        Ok(created)
    }

    fn update_status(
        &self,
        id: RelationshipId,
        status: RelationshipStatus,
        updated_at: u64,
    ) -> Result<bool, Self::Error> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE relationships SET status = ?2, updated_at = ?3
                 WHERE id = ?1 AND status = ?4",
                params![
                    id.to_bytes().to_vec(),
                    status.as_str(),
                    updated_at as i64,
                    RelationshipStatus::Pending.as_str(),
                ],
            )
            .map_err(StoreError::from_write)?;
        Ok(changed > 0)
    }

    fn delete(&self, id: RelationshipId) -> Result<bool, Self::Error> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM relationships WHERE id = ?1",
            params![id.to_bytes().to_vec()],
        )?;
        Ok(removed > 0)
    }

    fn list_by_status(
        &self,
        identity: IdentityId,
        status: RelationshipStatus,
        side: Side,
    ) -> Result<Vec<Relationship>, Self::Error> {
        let side_clause = match side {
            Side::Initiator => "initiator_id = ?1",
            Side::Target => "target_id = ?1",
            Side::Either => "(initiator_id = ?1 OR target_id = ?1)",
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM relationships
             WHERE {side_clause} AND status = ?2
             ORDER BY created_at, id"
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![identity.value(), status.as_str()], row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn mutual_accepted(
        &self,
        a: IdentityId,
        b: IdentityId,
    ) -> Result<Vec<MutualRow>, Self::Error> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT r.id, r.initiator_id, r.target_id, r.status, r.created_at, r.updated_at
             FROM accepted_edges ea
             JOIN accepted_edges eb ON eb.friend = ea.friend
             JOIN relationships r ON r.id = ea.id
             WHERE ea.owner = ?1 AND eb.owner = ?2
               AND ea.friend <> ?1 AND ea.friend <> ?2
             ORDER BY ea.friend",
        )?;

        let rows = stmt
            .query_map(params![a.value(), b.value()], |row| {
                let updated_at: Option<i64> = row.get(5)?;
                Ok(MutualRow {
                    id: read_id(row, 0)?,
                    initiator: read_identity(row, 1)?,
                    target: read_identity(row, 2)?,
                    status: row.get(3)?,
                    created_at: row.get::<_, i64>(4)? as u64,
                    updated_at: updated_at.map(|t| t as u64),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
