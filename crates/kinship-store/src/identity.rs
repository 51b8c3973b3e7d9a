//! Identity registry: a minimal stand-in for the account service

use crate::{SqliteStore, StoreError};
use kinship_domain::traits::IdentityDirectory;
use kinship_domain::{current_millis, IdentityId};
use rusqlite::{params, OptionalExtension};

impl SqliteStore {
    /// Register an identity, or reactivate and rename an existing one
    pub fn register_identity(&self, id: IdentityId, handle: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO identities (id, handle, active, created_at) VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(id) DO UPDATE SET handle = excluded.handle, active = 1",
            params![id.value(), handle, current_millis() as i64],
        )
        .map_err(StoreError::from_write)?;
        tracing::info!(identity = %id, handle, "identity registered");
        Ok(())
    }

    /// Mark an identity inactive; returns false when it was never registered
    pub fn deactivate_identity(&self, id: IdentityId) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE identities SET active = 0 WHERE id = ?1",
            params![id.value()],
        )?;
        Ok(changed > 0)
    }
}

impl IdentityDirectory for SqliteStore {
    type Error = StoreError;

    fn identity_exists(&self, id: IdentityId) -> Result<bool, Self::Error> {
        let conn = self.lock()?;
        let active: Option<bool> = conn
            .query_row(
                "SELECT active FROM identities WHERE id = ?1",
                params![id.value()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(active.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(v: i64) -> IdentityId {
        IdentityId::new(v).unwrap()
    }

    #[test]
    fn test_unknown_identity_does_not_exist() {
        let store = SqliteStore::open(":memory:").unwrap();
        assert!(!store.identity_exists(ident(1)).unwrap());
    }

    #[test]
    fn test_register_and_deactivate() {
        let store = SqliteStore::open(":memory:").unwrap();
        store.register_identity(ident(1), "alice").unwrap();
        assert!(store.identity_exists(ident(1)).unwrap());

        assert!(store.deactivate_identity(ident(1)).unwrap());
        assert!(!store.identity_exists(ident(1)).unwrap());

        // Registering again reactivates
        store.register_identity(ident(1), "alice").unwrap();
        assert!(store.identity_exists(ident(1)).unwrap());
    }

    #[test]
    fn test_deactivate_unknown_identity() {
        let store = SqliteStore::open(":memory:").unwrap();
        assert!(!store.deactivate_identity(ident(99)).unwrap());
    }
}
