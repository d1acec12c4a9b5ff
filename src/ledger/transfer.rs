// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! The transfer engine: moves funds between two wallets and persists an
//! immutable record of the movement.
//!
//! The debit and credit are two independent store calls with no transaction
//! spanning them. The record is persisted as `Pending` before either update
//! and marked `Settlement` only after both succeed, so a failure between the
//! two updates leaves a visibly unsettled record rather than silent
//! inconsistency. Callers at the HTTP boundary must verify that the
//! authenticated customer owns the source wallet before invoking this
//! engine.

use std::sync::Arc;

use crate::models::{Transaction, TransactionStatus};
use crate::storage::{StorageError, TransactionStore, WalletStore};

use super::error::TransferError;
use super::locks::WalletLocks;

/// The transfer engine.
pub struct TransferEngine {
    wallets: Arc<dyn WalletStore>,
    transactions: Arc<dyn TransactionStore>,
    locks: WalletLocks,
}

impl TransferEngine {
    /// Create a new engine over the injected stores.
    pub fn new(wallets: Arc<dyn WalletStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        Self {
            wallets,
            transactions,
            locks: WalletLocks::new(),
        }
    }

    /// Execute a transfer and persist its record.
    ///
    /// Order matters: the sender's balance is checked before the receiving
    /// wallet is even looked up, so a transfer to a nonexistent wallet still
    /// reports `InsufficientFunds` first when the sender cannot cover it.
    ///
    /// The amount is not validated for positivity and self-transfers are
    /// not rejected (see DESIGN.md).
    pub async fn create_transaction(
        &self,
        from_wallet_id: &str,
        to_wallet_id: &str,
        amount: f64,
        message: &str,
    ) -> Result<Transaction, TransferError> {
        tracing::info!(from_wallet_id, to_wallet_id, amount, "starting transfer");

        let _guard = self.locks.lock_pair(from_wallet_id, to_wallet_id).await;

        let from_wallet = self.get_wallet(from_wallet_id)?;

        if from_wallet.balance - amount < 0.0 {
            tracing::warn!(
                from_wallet_id,
                balance = from_wallet.balance,
                amount,
                "insufficient balance for transfer"
            );
            return Err(TransferError::InsufficientFunds);
        }

        let to_wallet = self.get_wallet(to_wallet_id)?;

        let mut transaction =
            Transaction::new_pending(from_wallet.id, to_wallet.id, amount, message);
        self.transactions.create(&transaction)?;

        self.wallets
            .update_balance(&transaction.from_wallet_id, -amount)?;
        self.wallets
            .update_balance(&transaction.to_wallet_id, amount)?;

        self.transactions
            .set_status(&transaction.id, TransactionStatus::Settlement)?;
        transaction.status = TransactionStatus::Settlement;

        tracing::info!(transaction_id = %transaction.id, "transfer settled");
        Ok(transaction)
    }

    fn get_wallet(&self, wallet_id: &str) -> Result<crate::models::Wallet, TransferError> {
        match self.wallets.get_by_id(wallet_id) {
            Ok(wallet) => Ok(wallet),
            Err(StorageError::NotFound(_)) => {
                Err(TransferError::WalletNotFound(wallet_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
