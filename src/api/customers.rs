// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Customer endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{auth::Auth, error::ApiError, state::AppState};

/// Public view of a customer, including their wallet projection.
/// The password hash is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    /// Customer id.
    pub id: String,
    /// Login name.
    pub username: String,
    /// The customer's wallet id.
    pub wallet_id: String,
    /// Current wallet balance.
    pub balance: f64,
}

/// Get a customer by id.
///
/// Customers can only read their own record.
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "Customer details", body = CustomerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not your customer record"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    Auth(authenticated): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let (customer, wallet) = state.registry.customer_with_wallet(&id)?;

    if customer.id != authenticated.customer_id {
        tracing::warn!(
            customer_id = %authenticated.customer_id,
            requested_id = %id,
            "customer record access denied"
        );
        return Err(ApiError::forbidden(
            "You don't have permission to access this customer",
        ));
    }

    Ok(Json(CustomerResponse {
        id: customer.id,
        username: customer.username,
        wallet_id: wallet.id,
        balance: wallet.balance,
    }))
}
