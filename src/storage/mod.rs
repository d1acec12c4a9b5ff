// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! # Storage Module
//!
//! Persistent storage for the ledger's entity collections. Each collection
//! is one JSON array file under the data root with read-all/write-all
//! semantics; writes are atomic via tmp+rename.
//!
//! ## Storage Layout
//!
//! ```text
//! ./data/
//!   customers.json       # Customer records (id, username, password hash)
//!   wallets.json         # One wallet per customer
//!   refresh_tokens.json  # Live refresh tokens
//!   blacklist.json       # Revoked access tokens
//!   transactions.json    # Append-only transfer records
//! ```
//!
//! The engines only see the trait contracts in [`repository`]; the JSON
//! adapters here and the in-memory adapters in [`memory`] are swappable.

pub mod json_fs;
pub mod memory;
pub mod paths;
pub mod repository;

pub use json_fs::{JsonStore, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    BlacklistStore, CustomerStore, JsonBlacklistStore, JsonCustomerStore, JsonRefreshTokenStore,
    JsonTransactionStore, JsonWalletStore, RefreshTokenStore, TransactionStore, WalletStore,
    REFRESH_TOKEN_TTL_HOURS,
};
