// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Transaction endpoints.
//!
//! The ownership check lives here at the boundary: the authenticated
//! customer must own the source wallet before the transfer engine is
//! invoked.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Transaction, TransactionStatus},
    state::AppState,
    storage::WalletStore,
};

/// Request to transfer funds between two wallets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Wallet to debit (must be owned by the caller).
    pub from_wallet_id: String,
    /// Wallet to credit.
    pub to_wallet_id: String,
    /// Amount to transfer.
    pub amount: f64,
    /// Free-form message attached to the record.
    #[serde(default)]
    pub message: String,
}

/// A persisted transfer record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    /// Transaction id.
    pub id: String,
    /// Debited wallet.
    pub from_wallet_id: String,
    /// Credited wallet.
    pub to_wallet_id: String,
    /// Transferred amount.
    pub amount: f64,
    /// Sender message.
    pub message: String,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            from_wallet_id: tx.from_wallet_id,
            to_wallet_id: tx.to_wallet_id,
            amount: tx.amount,
            message: tx.message,
            status: tx.status,
            created_at: tx.created_at,
        }
    }
}

/// Transfer funds from the caller's wallet to another wallet.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transfer settled", body = TransactionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Source wallet is not yours"),
        (status = 404, description = "Wallet not found"),
        (status = 422, description = "Insufficient funds")
    )
)]
pub async fn create_transaction(
    Auth(authenticated): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let from_wallet = state.wallets.get_by_id(&request.from_wallet_id)?;

    if from_wallet.customer_id != authenticated.customer_id {
        tracing::warn!(
            customer_id = %authenticated.customer_id,
            from_wallet_id = %request.from_wallet_id,
            "transfer from foreign wallet denied"
        );
        return Err(ApiError::forbidden(
            "You don't have permission to transfer from this wallet",
        ));
    }

    let transaction = state
        .transfers
        .create_transaction(
            &request.from_wallet_id,
            &request.to_wallet_id,
            request.amount,
            &request.message,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}
