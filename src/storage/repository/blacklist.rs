// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON-file adapter for the access-token blacklist.
//!
//! Entries carry the token's own expiry so an operator job can prune dead
//! entries with `purge_expired`; the request path never deletes anything.

use std::sync::Arc;

use crate::models::BlacklistEntry;

use super::super::{JsonStore, StorageResult};
use super::BlacklistStore;

/// Blacklist repository backed by the `blacklist.json` collection.
pub struct JsonBlacklistStore {
    store: Arc<JsonStore>,
}

impl JsonBlacklistStore {
    /// Create a new JsonBlacklistStore.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> StorageResult<Vec<BlacklistEntry>> {
        self.store
            .read_collection(self.store.paths().blacklist_file())
    }

    fn write_all(&self, entries: &[BlacklistEntry]) -> StorageResult<()> {
        self.store
            .write_collection(self.store.paths().blacklist_file(), entries)
    }
}

impl BlacklistStore for JsonBlacklistStore {
    fn get_all(&self) -> StorageResult<Vec<BlacklistEntry>> {
        self.read_all()
    }

    fn create(&self, access_token: &str, expires_at: i64) -> StorageResult<()> {
        let mut entries = self.read_all()?;
        entries.push(BlacklistEntry {
            access_token: access_token.to_string(),
            expires_at,
        });
        self.write_all(&entries)?;

        tracing::info!(expires_at, "access token blacklisted");
        Ok(())
    }

    fn purge_expired(&self, now: i64) -> StorageResult<usize> {
        let mut entries = self.read_all()?;
        let before = entries.len();
        entries.retain(|entry| entry.expires_at > now);
        let purged = before - entries.len();

        if purged > 0 {
            self.write_all(&entries)?;
            tracing::info!(purged, "expired blacklist entries removed");
        }

        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_repo() -> (JsonBlacklistStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(StoragePaths::new(dir.path()));
        store.initialize().unwrap();
        (JsonBlacklistStore::new(Arc::new(store)), dir)
    }

    #[test]
    fn created_entry_is_contained() {
        let (repo, _dir) = test_repo();
        repo.create("token-a", 1_700_000_000).unwrap();

        assert!(repo.contains("token-a").unwrap());
        assert!(!repo.contains("token-b").unwrap());
    }

    #[test]
    fn purge_removes_only_expired_entries() {
        let (repo, _dir) = test_repo();
        repo.create("old", 100).unwrap();
        repo.create("fresh", 10_000).unwrap();

        let purged = repo.purge_expired(1_000).unwrap();
        assert_eq!(purged, 1);

        assert!(!repo.contains("old").unwrap());
        assert!(repo.contains("fresh").unwrap());
    }

    #[test]
    fn purge_with_nothing_expired_is_a_noop() {
        let (repo, _dir) = test_repo();
        repo.create("fresh", 10_000).unwrap();

        assert_eq!(repo.purge_expired(1_000).unwrap(), 0);
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
