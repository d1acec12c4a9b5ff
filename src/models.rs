// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! # Domain Entities
//!
//! This module defines the persisted entities of the ledger. All types derive
//! `Serialize` and `Deserialize` so the JSON collection storage can handle
//! them directly; response-shaping DTOs live next to their handlers in `api`.
//!
//! ## Entity Categories
//!
//! - **Customer**: registered account with a hashed password
//! - **Wallet**: per-customer balance record (exactly one per customer)
//! - **RefreshToken**: opaque single-use credential for session rotation
//! - **BlacklistEntry**: explicitly revoked access token
//! - **Transaction**: immutable record of one completed transfer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered customer.
///
/// Created on registration and immutable thereafter. The `password_hash`
/// field holds a PHC-format argon2 hash and is NEVER returned via API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique customer identifier (UUID).
    pub id: String,
    /// Login name, unique and case-sensitive.
    pub username: String,
    /// One-way password hash (PHC string).
    pub password_hash: String,
}

impl Customer {
    /// Create a new customer with a generated id.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// A customer's balance record.
///
/// Created atomically with its customer, never deleted. The balance is only
/// mutated through the store's additive update operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Wallet {
    /// Unique wallet identifier (UUID).
    pub id: String,
    /// Owning customer (unique - one wallet per customer).
    pub customer_id: String,
    /// Current balance. Starts at 0.
    pub balance: f64,
}

impl Wallet {
    /// Create an empty wallet for a customer with a generated id.
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            balance: 0.0,
        }
    }
}

/// An opaque refresh token.
///
/// Single-use: consumed on every rotation attempt, win or lose. The auth
/// engine keeps at most one live token per customer via delete-then-create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshToken {
    /// The opaque token value (UUID).
    pub token: String,
    /// Customer this token belongs to.
    pub customer_id: String,
    /// Absolute expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

/// A revoked access token.
///
/// Presence in the blacklist makes the token permanently unusable even while
/// its signature-embedded expiry is still in the future. Entries are never
/// purged by the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlacklistEntry {
    /// The raw signed access token string.
    pub access_token: String,
    /// Unix-seconds expiry copied from the token's own `exp` claim.
    pub expires_at: i64,
}

/// Lifecycle status of a transfer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Record persisted, balance updates not yet (fully) applied.
    Pending,
    /// Both wallet updates applied.
    Settlement,
    /// Transfer abandoned.
    Rejected,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Immutable record of one transfer between two wallets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier (UUID).
    pub id: String,
    /// Debited wallet.
    pub from_wallet_id: String,
    /// Credited wallet.
    pub to_wallet_id: String,
    /// Transferred amount.
    pub amount: f64,
    /// Free-form sender message.
    pub message: String,
    /// Current lifecycle status.
    pub status: TransactionStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new pending transfer record with a generated id.
    pub fn new_pending(
        from_wallet_id: impl Into<String>,
        to_wallet_id: impl Into<String>,
        amount: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_wallet_id: from_wallet_id.into(),
            to_wallet_id: to_wallet_id.into(),
            amount,
            message: message.into(),
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
