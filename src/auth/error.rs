// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Authentication error taxonomy.
///
/// `BadCredentials` is returned for both unknown usernames and wrong
/// passwords so the two cases are indistinguishable to a caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Invalid authorization header format
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Unknown username or wrong password
    #[error("Invalid credentials")]
    BadCredentials,
    /// Malformed, wrong-algorithm, expired, or blacklisted access token
    #[error("Invalid access token")]
    InvalidToken,
    /// Refresh token does not exist (or was already consumed)
    #[error("Refresh token not found")]
    RefreshTokenNotFound,
    /// Refresh token exists but its expiry has passed
    #[error("Refresh token is expired")]
    RefreshTokenExpired,
    /// Access-token signing failed
    #[error("Failed to sign access token: {0}")]
    Signing(String),
    /// Underlying store failure, propagated unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::BadCredentials => "bad_credentials",
            AuthError::InvalidToken => "invalid_token",
            AuthError::RefreshTokenNotFound => "refresh_token_not_found",
            AuthError::RefreshTokenExpired => "refresh_token_expired",
            AuthError::Signing(_) => "signing_error",
            AuthError::Storage(_) => "storage_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::BadCredentials
            | AuthError::InvalidToken
            | AuthError::RefreshTokenNotFound
            | AuthError::RefreshTokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Signing(_) | AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_auth_returns_401() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_auth_header");
    }

    #[test]
    fn refresh_flow_errors_are_unauthorized() {
        assert_eq!(
            AuthError::RefreshTokenNotFound.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RefreshTokenExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = AuthError::Storage(StorageError::NotInitialized);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "storage_error");
    }
}
