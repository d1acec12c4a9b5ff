// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! In-memory store adapters.
//!
//! Implement the same contracts as the JSON-file repositories with plain
//! `Mutex`-guarded collections. Used by the engine test suites and usable as
//! an ephemeral backend.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{BlacklistEntry, Customer, RefreshToken, Transaction, TransactionStatus, Wallet};

use super::repository::{
    BlacklistStore, CustomerStore, RefreshTokenStore, TransactionStore, WalletStore,
    REFRESH_TOKEN_TTL_HOURS,
};
use super::{StorageError, StorageResult};

/// In-memory customer store.
#[derive(Default)]
pub struct MemoryCustomerStore {
    customers: Mutex<Vec<Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for MemoryCustomerStore {
    fn get_by_username(&self, username: &str) -> StorageResult<Customer> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.username == username)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("Customer {username}")))
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Customer> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("Customer {id}")))
    }

    fn create(&self, customer: &Customer) -> StorageResult<()> {
        let mut customers = self.customers.lock().unwrap();
        if customers.iter().any(|c| c.username == customer.username) {
            return Err(StorageError::AlreadyExists(format!(
                "Customer {}",
                customer.username
            )));
        }
        customers.push(customer.clone());
        Ok(())
    }
}

/// In-memory wallet store.
#[derive(Default)]
pub struct MemoryWalletStore {
    wallets: Mutex<Vec<Wallet>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a wallet with a preset balance. Test seeding helper.
    pub fn insert(&self, wallet: Wallet) {
        self.wallets.lock().unwrap().push(wallet);
    }
}

impl WalletStore for MemoryWalletStore {
    fn get_by_id(&self, id: &str) -> StorageResult<Wallet> {
        self.wallets
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("Wallet {id}")))
    }

    fn get_by_customer_id(&self, customer_id: &str) -> StorageResult<Wallet> {
        self.wallets
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.customer_id == customer_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("Wallet for customer {customer_id}")))
    }

    fn create(&self, customer_id: &str) -> StorageResult<Wallet> {
        let mut wallets = self.wallets.lock().unwrap();
        if wallets.iter().any(|w| w.customer_id == customer_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Wallet for customer {customer_id}"
            )));
        }
        let wallet = Wallet::new(customer_id);
        wallets.push(wallet.clone());
        Ok(wallet)
    }

    fn update_balance(&self, id: &str, delta: f64) -> StorageResult<()> {
        let mut wallets = self.wallets.lock().unwrap();
        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Wallet {id}")))?;
        wallet.balance += delta;
        Ok(())
    }
}

/// In-memory refresh-token store.
#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token as-is, bypassing TTL assignment. Test seeding helper
    /// for expired-token scenarios.
    pub fn insert(&self, token: RefreshToken) {
        self.tokens.lock().unwrap().push(token);
    }
}

impl RefreshTokenStore for MemoryRefreshTokenStore {
    fn create(&self, customer_id: &str) -> StorageResult<RefreshToken> {
        let token = RefreshToken {
            token: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        };
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    fn get_by_token(&self, token: &str) -> StorageResult<RefreshToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned()
            .ok_or_else(|| StorageError::NotFound("Refresh token".to_string()))
    }

    fn get_all(&self) -> StorageResult<Vec<RefreshToken>> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    fn delete(&self, token: &str) -> StorageResult<()> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.token != token);
        if tokens.len() == before {
            return Err(StorageError::NotFound("Refresh token".to_string()));
        }
        Ok(())
    }
}

/// In-memory blacklist store.
#[derive(Default)]
pub struct MemoryBlacklistStore {
    entries: Mutex<Vec<BlacklistEntry>>,
}

impl MemoryBlacklistStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlacklistStore for MemoryBlacklistStore {
    fn get_all(&self) -> StorageResult<Vec<BlacklistEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn create(&self, access_token: &str, expires_at: i64) -> StorageResult<()> {
        self.entries.lock().unwrap().push(BlacklistEntry {
            access_token: access_token.to_string(),
            expires_at,
        });
        Ok(())
    }

    fn purge_expired(&self, now: i64) -> StorageResult<usize> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.expires_at > now);
        Ok(before - entries.len())
    }
}

/// In-memory transaction store.
#[derive(Default)]
pub struct MemoryTransactionStore {
    transactions: Mutex<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test assertion helper.
    pub fn len(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn create(&self, transaction: &Transaction) -> StorageResult<()> {
        let mut transactions = self.transactions.lock().unwrap();
        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Transaction {}",
                transaction.id
            )));
        }
        transactions.push(transaction.clone());
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Transaction> {
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("Transaction {id}")))
    }

    fn list_by_wallet(&self, wallet_id: &str) -> StorageResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.from_wallet_id == wallet_id || t.to_wallet_id == wallet_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    fn set_status(&self, id: &str, status: TransactionStatus) -> StorageResult<()> {
        let mut transactions = self.transactions.lock().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Transaction {id}")))?;
        transaction.status = status;
        Ok(())
    }
}
