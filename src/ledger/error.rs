// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Ledger errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from the transfer engine.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Sender balance would go below zero
    #[error("Insufficient funds")]
    InsufficientFunds,
    /// A referenced wallet does not exist
    #[error("Wallet {0} not found")]
    WalletNotFound(String),
    /// Underlying store failure, propagated unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from customer registration and lookup.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Username already taken
    #[error("Username already exists")]
    DuplicateUsername,
    /// Customer already has a wallet
    #[error("Customer already has a wallet")]
    DuplicateWallet,
    /// Password hashing failed
    #[error(transparent)]
    PasswordHash(#[from] crate::auth::password::PasswordHashError),
    /// Underlying store failure, propagated unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}
