// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Path constants and utilities for the JSON collection layout.

use std::path::{Path, PathBuf};

/// Default root directory for persistent collections.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the JSON collection files.
///
/// Each entity collection lives in a single JSON array file:
/// ```text
/// ./data/
///   customers.json
///   wallets.json
///   refresh_tokens.json
///   blacklist.json
///   transactions.json
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all collection files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the customers collection.
    pub fn customers_file(&self) -> PathBuf {
        self.root.join("customers.json")
    }

    /// Path to the wallets collection.
    pub fn wallets_file(&self) -> PathBuf {
        self.root.join("wallets.json")
    }

    /// Path to the refresh-tokens collection.
    pub fn refresh_tokens_file(&self) -> PathBuf {
        self.root.join("refresh_tokens.json")
    }

    /// Path to the access-token blacklist collection.
    pub fn blacklist_file(&self) -> PathBuf {
        self.root.join("blacklist.json")
    }

    /// Path to the transactions collection.
    pub fn transactions_file(&self) -> PathBuf {
        self.root.join("transactions.json")
    }

    /// All collection files, used during initialization.
    pub fn collection_files(&self) -> [PathBuf; 5] {
        [
            self.customers_file(),
            self.wallets_file(),
            self.refresh_tokens_file(),
            self.blacklist_file(),
            self.transactions_file(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.customers_file(),
            PathBuf::from("/tmp/test-data/customers.json")
        );
    }

    #[test]
    fn collection_paths_are_correct() {
        let paths = StoragePaths::new("/tmp/d");
        assert_eq!(paths.wallets_file(), PathBuf::from("/tmp/d/wallets.json"));
        assert_eq!(
            paths.refresh_tokens_file(),
            PathBuf::from("/tmp/d/refresh_tokens.json")
        );
        assert_eq!(
            paths.blacklist_file(),
            PathBuf::from("/tmp/d/blacklist.json")
        );
        assert_eq!(
            paths.transactions_file(),
            PathBuf::from("/tmp/d/transactions.json")
        );
    }

    #[test]
    fn collection_files_lists_every_collection() {
        let paths = StoragePaths::new("/tmp/d");
        let files = paths.collection_files();
        assert_eq!(files.len(), 5);
        assert!(files.contains(&paths.customers_file()));
        assert!(files.contains(&paths.transactions_file()));
    }
}
