// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! JWT claims and the authenticated customer representation.

use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Issuer (the configured application name).
    pub iss: String,

    /// Subject - the customer id.
    pub sub: String,

    /// Issued-at timestamp (unix seconds).
    pub iat: i64,

    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

/// The authenticated customer behind a verified bearer token.
///
/// This is the type handlers receive from the `Auth` extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    /// Customer id from the token's `sub` claim.
    pub customer_id: String,

    /// Token expiration (unix seconds), available for logging.
    pub expires_at: i64,
}

impl From<AccessClaims> for AuthenticatedCustomer {
    fn from(claims: AccessClaims) -> Self {
        Self {
            customer_id: claims.sub,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_customer_takes_subject_and_expiry() {
        let claims = AccessClaims {
            iss: "payment-ledger".to_string(),
            sub: "cust-42".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_300,
        };

        let customer: AuthenticatedCustomer = claims.into();
        assert_eq!(customer.customer_id, "cust-42");
        assert_eq!(customer.expires_at, 1_700_000_300);
    }
}
