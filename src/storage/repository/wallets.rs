// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON-file adapter for the wallet store.
//!
//! The balance is mutated only through `update_balance`, which applies a
//! signed delta. The sufficiency check lives in the transfer engine, not
//! here; this adapter will happily drive a balance negative if asked.

use std::sync::Arc;

use crate::models::Wallet;

use super::super::{JsonStore, StorageError, StorageResult};
use super::WalletStore;

/// Wallet repository backed by the `wallets.json` collection.
pub struct JsonWalletStore {
    store: Arc<JsonStore>,
}

impl JsonWalletStore {
    /// Create a new JsonWalletStore.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> StorageResult<Vec<Wallet>> {
        self.store
            .read_collection(self.store.paths().wallets_file())
    }

    fn write_all(&self, wallets: &[Wallet]) -> StorageResult<()> {
        self.store
            .write_collection(self.store.paths().wallets_file(), wallets)
    }
}

impl WalletStore for JsonWalletStore {
    fn get_by_id(&self, id: &str) -> StorageResult<Wallet> {
        self.read_all()?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Wallet {id}")))
    }

    fn get_by_customer_id(&self, customer_id: &str) -> StorageResult<Wallet> {
        self.read_all()?
            .into_iter()
            .find(|w| w.customer_id == customer_id)
            .ok_or_else(|| StorageError::NotFound(format!("Wallet for customer {customer_id}")))
    }

    fn create(&self, customer_id: &str) -> StorageResult<Wallet> {
        let mut wallets = self.read_all()?;

        if wallets.iter().any(|w| w.customer_id == customer_id) {
            tracing::warn!(customer_id, "customer already has a wallet");
            return Err(StorageError::AlreadyExists(format!(
                "Wallet for customer {customer_id}"
            )));
        }

        let wallet = Wallet::new(customer_id);
        wallets.push(wallet.clone());
        self.write_all(&wallets)?;

        tracing::info!(wallet_id = %wallet.id, customer_id, "wallet created");
        Ok(wallet)
    }

    fn update_balance(&self, id: &str, delta: f64) -> StorageResult<()> {
        let mut wallets = self.read_all()?;

        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Wallet {id}")))?;

        wallet.balance += delta;
        tracing::info!(wallet_id = id, delta, balance = wallet.balance, "wallet balance updated");

        self.write_all(&wallets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_repo() -> (JsonWalletStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(StoragePaths::new(dir.path()));
        store.initialize().unwrap();
        (JsonWalletStore::new(Arc::new(store)), dir)
    }

    #[test]
    fn create_starts_at_zero_and_is_retrievable() {
        let (repo, _dir) = test_repo();
        let wallet = repo.create("cust-1").unwrap();
        assert_eq!(wallet.balance, 0.0);

        let by_id = repo.get_by_id(&wallet.id).unwrap();
        assert_eq!(by_id.customer_id, "cust-1");

        let by_customer = repo.get_by_customer_id("cust-1").unwrap();
        assert_eq!(by_customer.id, wallet.id);
    }

    #[test]
    fn one_wallet_per_customer() {
        let (repo, _dir) = test_repo();
        repo.create("cust-1").unwrap();

        let result = repo.create("cust-1");
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn update_balance_accumulates_deltas() {
        let (repo, _dir) = test_repo();
        let wallet = repo.create("cust-1").unwrap();

        repo.update_balance(&wallet.id, 100.0).unwrap();
        repo.update_balance(&wallet.id, -40.0).unwrap();

        let updated = repo.get_by_id(&wallet.id).unwrap();
        assert_eq!(updated.balance, 60.0);
    }

    #[test]
    fn update_balance_on_missing_wallet_is_not_found() {
        let (repo, _dir) = test_repo();
        let result = repo.update_balance("missing", 1.0);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
