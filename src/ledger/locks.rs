// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Per-wallet serialization.
//!
//! The stores expose plain read-then-write round trips with no isolation, so
//! two concurrent transfers debiting one wallet could both pass the
//! sufficiency check against a stale balance. [`WalletLocks`] closes that
//! window by serializing transfers per wallet id.
//!
//! Pair acquisition is ordered by wallet id so that transfers A->B and B->A
//! cannot deadlock against each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Table of per-wallet async mutexes, created on first use.
///
/// Entries are never removed; the table grows with the number of wallets
/// ever transacted on, which is bounded by the wallet collection itself.
#[derive(Default)]
pub struct WalletLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Guards held for the duration of one transfer.
pub struct PairGuard {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}

impl WalletLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, wallet_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(wallet_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Lock a single wallet.
    pub async fn lock(&self, wallet_id: &str) -> OwnedMutexGuard<()> {
        self.entry(wallet_id).lock_owned().await
    }

    /// Lock both wallets of a transfer in a globally consistent order.
    ///
    /// A self-transfer takes a single lock.
    pub async fn lock_pair(&self, a: &str, b: &str) -> PairGuard {
        if a == b {
            return PairGuard {
                _first: self.lock(a).await,
                _second: None,
            };
        }

        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.lock(first).await;
        let second_guard = self.lock(second).await;
        PairGuard {
            _first: first_guard,
            _second: Some(second_guard),
        }
    }
}
