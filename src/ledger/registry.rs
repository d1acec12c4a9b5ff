// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Customer registration and lookup.
//!
//! Registration creates the customer record and its wallet in sequence.
//! There is no rollback: if wallet creation fails after the customer was
//! persisted, the customer exists without a wallet. Referential integrity
//! relies on this creation order, not on storage constraints.

use std::sync::Arc;

use crate::auth::PasswordHasher;
use crate::models::{Customer, Wallet};
use crate::storage::{CustomerStore, StorageError, WalletStore};

use super::error::RegistrationError;

/// Customer registration and profile lookup.
pub struct CustomerRegistry {
    customers: Arc<dyn CustomerStore>,
    wallets: Arc<dyn WalletStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CustomerRegistry {
    /// Create a new registry over the injected stores.
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        wallets: Arc<dyn WalletStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            customers,
            wallets,
            hasher,
        }
    }

    /// Register a new customer and create their wallet.
    pub fn register(&self, username: &str, password: &str) -> Result<Customer, RegistrationError> {
        let password_hash = self.hasher.hash(password)?;
        let customer = Customer::new(username, password_hash);

        match self.customers.create(&customer) {
            Ok(()) => {}
            Err(StorageError::AlreadyExists(_)) => {
                return Err(RegistrationError::DuplicateUsername)
            }
            Err(e) => return Err(e.into()),
        }

        match self.wallets.create(&customer.id) {
            Ok(_) => {}
            Err(StorageError::AlreadyExists(_)) => return Err(RegistrationError::DuplicateWallet),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(customer_id = %customer.id, username, "customer registered");
        Ok(customer)
    }

    /// Look up a customer together with their wallet.
    pub fn customer_with_wallet(&self, id: &str) -> Result<(Customer, Wallet), RegistrationError> {
        let customer = self.customers.get_by_id(id)?;
        let wallet = self.wallets.get_by_customer_id(id)?;
        Ok((customer, wallet))
    }
}
