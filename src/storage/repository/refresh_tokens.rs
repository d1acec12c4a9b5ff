// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JSON-file adapter for the refresh-token store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::RefreshToken;

use super::super::{JsonStore, StorageError, StorageResult};
use super::{RefreshTokenStore, REFRESH_TOKEN_TTL_HOURS};

/// Refresh-token repository backed by the `refresh_tokens.json` collection.
pub struct JsonRefreshTokenStore {
    store: Arc<JsonStore>,
}

impl JsonRefreshTokenStore {
    /// Create a new JsonRefreshTokenStore.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> StorageResult<Vec<RefreshToken>> {
        self.store
            .read_collection(self.store.paths().refresh_tokens_file())
    }

    fn write_all(&self, tokens: &[RefreshToken]) -> StorageResult<()> {
        self.store
            .write_collection(self.store.paths().refresh_tokens_file(), tokens)
    }
}

impl RefreshTokenStore for JsonRefreshTokenStore {
    fn create(&self, customer_id: &str) -> StorageResult<RefreshToken> {
        let token = RefreshToken {
            token: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        };

        let mut tokens = self.read_all()?;
        tokens.push(token.clone());
        self.write_all(&tokens)?;

        tracing::info!(customer_id, "refresh token created");
        Ok(token)
    }

    fn get_by_token(&self, token: &str) -> StorageResult<RefreshToken> {
        self.read_all()?
            .into_iter()
            .find(|t| t.token == token)
            .ok_or_else(|| StorageError::NotFound("Refresh token".to_string()))
    }

    fn get_all(&self) -> StorageResult<Vec<RefreshToken>> {
        self.read_all()
    }

    fn delete(&self, token: &str) -> StorageResult<()> {
        let mut tokens = self.read_all()?;
        let before = tokens.len();
        tokens.retain(|t| t.token != token);

        if tokens.len() == before {
            return Err(StorageError::NotFound("Refresh token".to_string()));
        }

        self.write_all(&tokens)?;
        tracing::info!("refresh token deleted");
        Ok(())
    }
}
