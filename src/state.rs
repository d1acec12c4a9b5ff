// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Shared application state.

use std::sync::Arc;

use crate::auth::{Argon2Hasher, AuthEngine, PasswordHasher, TokenSigner};
use crate::config::AppConfig;
use crate::ledger::{CustomerRegistry, TransferEngine};
use crate::storage::{
    BlacklistStore, CustomerStore, JsonBlacklistStore, JsonCustomerStore, JsonRefreshTokenStore,
    JsonStore, JsonTransactionStore, JsonWalletStore, RefreshTokenStore, TransactionStore,
    WalletStore,
};

/// Shared state handed to every handler. Cheap to clone: everything inside
/// is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthEngine>,
    pub registry: Arc<CustomerRegistry>,
    pub transfers: Arc<TransferEngine>,
    pub wallets: Arc<dyn WalletStore>,
}

impl AppState {
    /// Build state over the JSON-file repositories.
    pub fn new(store: Arc<JsonStore>, config: &AppConfig) -> Self {
        Self::with_stores(
            Arc::new(JsonCustomerStore::new(store.clone())),
            Arc::new(JsonWalletStore::new(store.clone())),
            Arc::new(JsonRefreshTokenStore::new(store.clone())),
            Arc::new(JsonBlacklistStore::new(store.clone())),
            Arc::new(JsonTransactionStore::new(store)),
            Arc::new(Argon2Hasher::new()),
            config,
        )
    }

    /// Build state over arbitrary store implementations. Used by tests with
    /// the in-memory adapters.
    #[allow(clippy::too_many_arguments)]
    pub fn with_stores(
        customers: Arc<dyn CustomerStore>,
        wallets: Arc<dyn WalletStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        blacklist: Arc<dyn BlacklistStore>,
        transactions: Arc<dyn TransactionStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: &AppConfig,
    ) -> Self {
        let signer = TokenSigner::new(
            config.application_name.clone(),
            config.access_token_ttl,
            &config.jwt_signature_key,
        );

        let auth = Arc::new(AuthEngine::new(
            customers.clone(),
            refresh_tokens,
            blacklist,
            hasher.clone(),
            signer,
        ));
        let registry = Arc::new(CustomerRegistry::new(
            customers,
            wallets.clone(),
            hasher,
        ));
        let transfers = Arc::new(TransferEngine::new(wallets.clone(), transactions));

        Self {
            auth,
            registry,
            transfers,
            wallets,
        }
    }
}

/// In-memory state for handler and router tests.
#[cfg(test)]
pub(crate) fn memory_state() -> AppState {
    use crate::storage::memory::{
        MemoryBlacklistStore, MemoryCustomerStore, MemoryRefreshTokenStore,
        MemoryTransactionStore, MemoryWalletStore,
    };

    AppState::with_stores(
        Arc::new(MemoryCustomerStore::new()),
        Arc::new(MemoryWalletStore::new()),
        Arc::new(MemoryRefreshTokenStore::new()),
        Arc::new(MemoryBlacklistStore::new()),
        Arc::new(MemoryTransactionStore::new()),
        Arc::new(Argon2Hasher::new()),
        &AppConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_builds_and_clones() {
        let state = memory_state();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.auth, &clone.auth));
        assert!(Arc::ptr_eq(&state.registry, &clone.registry));
    }
}
