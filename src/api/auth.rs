// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Authentication endpoints: register, login, logout, refresh.
//!
//! Login and refresh both return a full [`AuthResponse`] pair; the refresh
//! token travels in the JSON body in both directions.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{extractor::bearer_token, AuthSession},
    error::ApiError,
    state::AppState,
};

/// Credentials for registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// Login name, unique and case-sensitive.
    pub username: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Token pair issued on login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Signed short-lived access token.
    pub access_token: String,
    /// Opaque single-use refresh token.
    pub refresh_token: String,
    /// The authenticated customer's id.
    pub customer_id: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            customer_id: session.customer_id,
        }
    }
}

/// Request carrying a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    /// The refresh token to consume.
    pub refresh_token: String,
}

/// Simple confirmation response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Register a new customer.
///
/// Creates the customer record and an empty wallet for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Customer registered", body = MessageResponse),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.registry.register(&request.username, &request.password)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Successfully created a new customer".to_string(),
        }),
    ))
}

/// Log in with username and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.auth.login(&request.username, &request.password)?;
    Ok(Json(session.into()))
}

/// Log out: blacklist the presented access token and delete the refresh
/// token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    security(("bearer_auth" = [])),
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Missing/invalid bearer token or refresh token")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let access_token = bearer_token(&headers)?;
    state.auth.logout(access_token, &request.refresh_token)?;

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// Exchange a refresh token for a new token pair.
///
/// The presented refresh token is consumed whether or not the exchange
/// succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    tag = "Auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair issued", body = AuthResponse),
        (status = 401, description = "Refresh token missing or expired")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.auth.refresh(&request.refresh_token)?;
    Ok(Json(session.into()))
}
