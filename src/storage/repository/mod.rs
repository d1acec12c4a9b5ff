// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Store contracts and their JSON-file adapters.
//!
//! The engines depend on these traits, never on a concrete storage
//! mechanism. Two adapter families exist: the JSON-file repositories in this
//! module (production) and the in-memory stores in `storage::memory`
//! (tests, embedded use).

pub mod blacklist;
pub mod customers;
pub mod refresh_tokens;
pub mod transactions;
pub mod wallets;

pub use blacklist::JsonBlacklistStore;
pub use customers::JsonCustomerStore;
pub use refresh_tokens::JsonRefreshTokenStore;
pub use transactions::JsonTransactionStore;
pub use wallets::JsonWalletStore;

use crate::models::{BlacklistEntry, Customer, RefreshToken, Transaction, TransactionStatus, Wallet};

use super::StorageResult;

/// Refresh-token lifetime in hours.
///
/// Deliberately a hardcoded constant, kept distinct from the configurable
/// access-token TTL.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 24;

/// Customer records and their password verification data.
pub trait CustomerStore: Send + Sync {
    /// Look up a customer by username (case-sensitive).
    fn get_by_username(&self, username: &str) -> StorageResult<Customer>;

    /// Look up a customer by id.
    fn get_by_id(&self, id: &str) -> StorageResult<Customer>;

    /// Persist a new customer. Fails with `AlreadyExists` when the username
    /// is already taken.
    fn create(&self, customer: &Customer) -> StorageResult<()>;
}

/// One wallet per customer, with an additively updated balance.
pub trait WalletStore: Send + Sync {
    /// Look up a wallet by id.
    fn get_by_id(&self, id: &str) -> StorageResult<Wallet>;

    /// Look up the wallet owned by a customer.
    fn get_by_customer_id(&self, customer_id: &str) -> StorageResult<Wallet>;

    /// Create an empty wallet for a customer. Fails with `AlreadyExists`
    /// when the customer already has one.
    fn create(&self, customer_id: &str) -> StorageResult<Wallet>;

    /// Apply `delta` to a wallet's balance. Fails with `NotFound` when the
    /// wallet does not exist.
    fn update_balance(&self, id: &str, delta: f64) -> StorageResult<()>;
}

/// Refresh-token records. The "one live token per customer" policy is
/// enforced by the auth engine, not here.
pub trait RefreshTokenStore: Send + Sync {
    /// Create a new opaque token for a customer, expiring
    /// [`REFRESH_TOKEN_TTL_HOURS`] from now.
    fn create(&self, customer_id: &str) -> StorageResult<RefreshToken>;

    /// Look up a token by its value.
    fn get_by_token(&self, token: &str) -> StorageResult<RefreshToken>;

    /// All stored tokens.
    fn get_all(&self) -> StorageResult<Vec<RefreshToken>>;

    /// Delete a token by its value. Fails with `NotFound` when absent.
    fn delete(&self, token: &str) -> StorageResult<()>;
}

/// Revoked access tokens.
pub trait BlacklistStore: Send + Sync {
    /// All blacklist entries.
    fn get_all(&self) -> StorageResult<Vec<BlacklistEntry>>;

    /// Whether an access token has been revoked.
    fn contains(&self, access_token: &str) -> StorageResult<bool> {
        Ok(self
            .get_all()?
            .iter()
            .any(|entry| entry.access_token == access_token))
    }

    /// Add an access token to the blacklist. `expires_at` is the token's own
    /// `exp` claim in unix seconds.
    fn create(&self, access_token: &str, expires_at: i64) -> StorageResult<()>;

    /// Remove entries whose `expires_at` is at or before `now`.
    ///
    /// Not wired into any request flow; available for an operator cron.
    fn purge_expired(&self, now: i64) -> StorageResult<usize>;
}

/// Append-only transfer records.
pub trait TransactionStore: Send + Sync {
    /// Persist a new transfer record.
    fn create(&self, transaction: &Transaction) -> StorageResult<()>;

    /// Look up a record by id.
    fn get_by_id(&self, id: &str) -> StorageResult<Transaction>;

    /// All records where the wallet appears on either side, newest first.
    fn list_by_wallet(&self, wallet_id: &str) -> StorageResult<Vec<Transaction>>;

    /// Update a record's lifecycle status.
    fn set_status(&self, id: &str, status: TransactionStatus) -> StorageResult<()>;
}
