// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Access-token signing and verification.
//!
//! Signing is pinned to HMAC-SHA256: `verify` builds its validation from
//! [`Algorithm::HS256`] only, so a token signed with any other algorithm -
//! even with the right key bytes - is rejected.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::AccessClaims;
use super::error::AuthError;

/// Signs and verifies access tokens for a fixed issuer, key, and TTL.
///
/// Constructed once from [`crate::config::AppConfig`] and injected into the
/// auth engine; there is no process-wide signing state.
pub struct TokenSigner {
    issuer: String,
    ttl: chrono::Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    /// Create a new signer.
    pub fn new(issuer: impl Into<String>, ttl: chrono::Duration, secret: &[u8]) -> Self {
        Self {
            issuer: issuer.into(),
            ttl,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a new access token for a customer.
    ///
    /// Claims: issuer, subject = customer id, issued-at = now,
    /// expires-at = now + configured TTL.
    pub fn sign(&self, customer_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AccessClaims {
            iss: self.issuer.clone(),
            sub: customer_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token's signature, algorithm, and expiry, returning its
    /// claims.
    ///
    /// Any failure - malformed token, tampered or wrong-key signature,
    /// non-HS256 algorithm, past expiry - collapses to
    /// [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}
