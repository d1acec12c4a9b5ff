// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON collection storage with whole-file read/write semantics.
//!
//! Each entity collection is one JSON array file. Every store operation is a
//! full read-then-write round trip with no isolation from concurrent callers;
//! callers that need serialization bring their own (see `ledger::locks`).
//!
//! Writes go to a temp file first and are renamed into place, so a crashed
//! write never leaves a half-written collection behind.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::StoragePaths;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Entity already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage manager for the JSON collection files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    paths: StoragePaths,
    initialized: bool,
}

impl JsonStore {
    /// Create a new JsonStore.
    ///
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Initialize the storage directory and seed empty collection files.
    ///
    /// Existing collection files are left untouched. Safe to call multiple
    /// times (idempotent).
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.root())?;

        for file in self.paths.collection_files() {
            if !file.exists() {
                fs::write(&file, b"[]")?;
            }
        }

        self.initialized = true;
        Ok(())
    }

    /// Read an entire collection file and deserialize it.
    ///
    /// A missing collection file is an error: `initialize()` seeds every
    /// collection, so absence means the storage root is broken.
    pub fn read_collection<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
    ) -> StorageResult<Vec<T>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(path.display().to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Replace an entire collection file (atomic write via rename).
    pub fn write_collection<T: Serialize>(
        &self,
        path: impl AsRef<Path>,
        items: &[T],
    ) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, items)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestItem {
        id: String,
        value: i32,
    }

    fn test_store() -> (JsonStore, TempDir) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = JsonStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("failed to initialize");
        (store, dir)
    }

    #[test]
    fn initialize_seeds_empty_collections() {
        let (store, _dir) = test_store();

        for file in store.paths().collection_files() {
            assert!(file.exists(), "missing collection {}", file.display());
        }

        let customers: Vec<TestItem> = store
            .read_collection(store.paths().customers_file())
            .unwrap();
        assert!(customers.is_empty());
    }

    #[test]
    fn initialize_preserves_existing_data() {
        let (store, dir) = test_store();
        let path = store.paths().wallets_file();

        let items = vec![TestItem {
            id: "a".into(),
            value: 1,
        }];
        store.write_collection(&path, &items).unwrap();

        // Re-initialize over the same root
        let mut again = JsonStore::new(StoragePaths::new(dir.path()));
        again.initialize().unwrap();

        let read: Vec<TestItem> = again.read_collection(&path).unwrap();
        assert_eq!(read, items);
    }

    #[test]
    fn write_and_read_round_trip() {
        let (store, _dir) = test_store();
        let path = store.paths().transactions_file();

        let items = vec![
            TestItem {
                id: "t1".into(),
                value: 10,
            },
            TestItem {
                id: "t2".into(),
                value: 20,
            },
        ];
        store.write_collection(&path, &items).unwrap();

        let read: Vec<TestItem> = store.read_collection(&path).unwrap();
        assert_eq!(read, items);
    }

    #[test]
    fn missing_collection_is_not_found() {
        let (store, dir) = test_store();
        let missing = dir.path().join("nothing.json");

        let result = store.read_collection::<TestItem>(&missing);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn uninitialized_store_returns_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(StoragePaths::new(dir.path()));

        let read = store.read_collection::<TestItem>(store.paths().customers_file());
        assert!(matches!(read, Err(StorageError::NotInitialized)));

        let write = store.write_collection::<TestItem>(store.paths().customers_file(), &[]);
        assert!(matches!(write, Err(StorageError::NotInitialized)));
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let (store, _dir) = test_store();
        let path = store.paths().blacklist_file();

        store
            .write_collection(
                &path,
                &[TestItem {
                    id: "x".into(),
                    value: 0,
                }],
            )
            .unwrap();

        assert!(!path.with_extension("tmp").exists());
    }
}
