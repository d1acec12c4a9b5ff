// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON-file adapter for the customer store.

use std::sync::Arc;

use crate::models::Customer;

use super::super::{JsonStore, StorageError, StorageResult};
use super::CustomerStore;

/// Customer repository backed by the `customers.json` collection.
pub struct JsonCustomerStore {
    store: Arc<JsonStore>,
}

impl JsonCustomerStore {
    /// Create a new JsonCustomerStore.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> StorageResult<Vec<Customer>> {
        self.store
            .read_collection(self.store.paths().customers_file())
    }
}

impl CustomerStore for JsonCustomerStore {
    fn get_by_username(&self, username: &str) -> StorageResult<Customer> {
        self.read_all()?
            .into_iter()
            .find(|c| c.username == username)
            .ok_or_else(|| StorageError::NotFound(format!("Customer {username}")))
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Customer> {
        self.read_all()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Customer {id}")))
    }

    fn create(&self, customer: &Customer) -> StorageResult<()> {
        let mut customers = self.read_all()?;

        if customers.iter().any(|c| c.username == customer.username) {
            tracing::warn!(username = %customer.username, "duplicate username on create");
            return Err(StorageError::AlreadyExists(format!(
                "Customer {}",
                customer.username
            )));
        }

        customers.push(customer.clone());
        self.store
            .write_collection(self.store.paths().customers_file(), &customers)?;

        tracing::info!(customer_id = %customer.id, username = %customer.username, "customer created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_repo() -> (JsonCustomerStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(StoragePaths::new(dir.path()));
        store.initialize().unwrap();
        (JsonCustomerStore::new(Arc::new(store)), dir)
    }

    #[test]
    fn create_and_get_by_username_and_id() {
        let (repo, _dir) = test_repo();
        let customer = Customer::new("alice", "hash");
        repo.create(&customer).unwrap();

        let by_name = repo.get_by_username("alice").unwrap();
        assert_eq!(by_name.id, customer.id);

        let by_id = repo.get_by_id(&customer.id).unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let (repo, _dir) = test_repo();
        repo.create(&Customer::new("alice", "hash-1")).unwrap();

        let result = repo.create(&Customer::new("alice", "hash-2"));
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn username_lookup_is_case_sensitive() {
        let (repo, _dir) = test_repo();
        repo.create(&Customer::new("Alice", "hash")).unwrap();

        assert!(matches!(
            repo.get_by_username("alice"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn missing_customer_is_not_found() {
        let (repo, _dir) = test_repo();
        assert!(matches!(
            repo.get_by_id("missing"),
            Err(StorageError::NotFound(_))
        ));
    }
}
