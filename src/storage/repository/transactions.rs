// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON-file adapter for the transfer-record store.

use std::sync::Arc;

use crate::models::{Transaction, TransactionStatus};

use super::super::{JsonStore, StorageError, StorageResult};
use super::TransactionStore;

/// Transaction repository backed by the `transactions.json` collection.
pub struct JsonTransactionStore {
    store: Arc<JsonStore>,
}

impl JsonTransactionStore {
    /// Create a new JsonTransactionStore.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> StorageResult<Vec<Transaction>> {
        self.store
            .read_collection(self.store.paths().transactions_file())
    }

    fn write_all(&self, transactions: &[Transaction]) -> StorageResult<()> {
        self.store
            .write_collection(self.store.paths().transactions_file(), transactions)
    }
}

impl TransactionStore for JsonTransactionStore {
    fn create(&self, transaction: &Transaction) -> StorageResult<()> {
        let mut transactions = self.read_all()?;

        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Transaction {}",
                transaction.id
            )));
        }

        transactions.push(transaction.clone());
        self.write_all(&transactions)?;

        tracing::info!(
            transaction_id = %transaction.id,
            from_wallet_id = %transaction.from_wallet_id,
            to_wallet_id = %transaction.to_wallet_id,
            amount = transaction.amount,
            "transaction recorded"
        );
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Transaction> {
        self.read_all()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Transaction {id}")))
    }

    fn list_by_wallet(&self, wallet_id: &str) -> StorageResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .read_all()?
            .into_iter()
            .filter(|t| t.from_wallet_id == wallet_id || t.to_wallet_id == wallet_id)
            .collect();

        // Newest first
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    fn set_status(&self, id: &str, status: TransactionStatus) -> StorageResult<()> {
        let mut transactions = self.read_all()?;

        let transaction = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Transaction {id}")))?;

        transaction.status = status;
        self.write_all(&transactions)
    }
}
