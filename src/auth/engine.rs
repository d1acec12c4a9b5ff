// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! The session-lifecycle engine: issues, verifies, rotates, and revokes
//! tokens.
//!
//! A session moves through these states:
//!
//! ```text
//! Issued(access, refresh)
//!   -- logout -->  access blacklisted, refresh deleted   (terminal)
//!   -- refresh (valid)   -->  Issued(access', refresh')  (old refresh consumed)
//!   -- refresh (expired) -->  revoked                    (refresh already consumed)
//! ```
//!
//! An access token carries no server-side state except the blacklist: it is
//! valid until its signature-embedded expiry OR its presence there.

use std::sync::Arc;

use crate::storage::{BlacklistStore, CustomerStore, RefreshTokenStore, StorageError};

use super::claims::AuthenticatedCustomer;
use super::error::AuthError;
use super::password::PasswordHasher;
use super::tokens::TokenSigner;

/// A freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed short-lived access token.
    pub access_token: String,
    /// Opaque single-use refresh token.
    pub refresh_token: String,
    /// The customer the pair was issued to.
    pub customer_id: String,
}

/// The authentication engine.
pub struct AuthEngine {
    customers: Arc<dyn CustomerStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    blacklist: Arc<dyn BlacklistStore>,
    hasher: Arc<dyn PasswordHasher>,
    signer: TokenSigner,
}

impl AuthEngine {
    /// Create a new engine over the injected stores and signer.
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        blacklist: Arc<dyn BlacklistStore>,
        hasher: Arc<dyn PasswordHasher>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            customers,
            refresh_tokens,
            blacklist,
            hasher,
            signer,
        }
    }

    /// Authenticate a customer by credentials and issue a token pair.
    ///
    /// Unknown usernames and wrong passwords are both reported as
    /// [`AuthError::BadCredentials`] so callers cannot enumerate usernames.
    pub fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let customer = match self.customers.get_by_username(username) {
            Ok(customer) => customer,
            Err(StorageError::NotFound(_)) => {
                tracing::warn!(username, "login for unknown username");
                return Err(AuthError::BadCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(password, &customer.password_hash) {
            tracing::warn!(username, "login with wrong password");
            return Err(AuthError::BadCredentials);
        }

        let access_token = self.signer.sign(&customer.id)?;
        let refresh_token = self.issue_refresh_token(&customer.id)?;

        tracing::info!(customer_id = %customer.id, "login successful");
        Ok(AuthSession {
            access_token,
            refresh_token: refresh_token.token,
            customer_id: customer.id,
        })
    }

    /// Revoke an access token and delete the session's refresh token.
    ///
    /// Blacklisting is idempotent: a second logout with the same access
    /// token is a successful no-op on the blacklist side, but deleting the
    /// already-deleted refresh token fails with `RefreshTokenNotFound`.
    pub fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        self.blacklist_access_token(access_token)?;

        match self.refresh_tokens.delete(refresh_token) {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => return Err(AuthError::RefreshTokenNotFound),
            Err(e) => return Err(e.into()),
        }

        tracing::info!("logout successful");
        Ok(())
    }

    /// Rotate a refresh token into a new token pair.
    ///
    /// The presented token is consumed whether or not it turns out to be
    /// expired: it is deleted before the expiry check, so a failed refresh
    /// cannot be retried with the same token.
    pub fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let token = match self.refresh_tokens.get_by_token(refresh_token) {
            Ok(token) => token,
            Err(StorageError::NotFound(_)) => return Err(AuthError::RefreshTokenNotFound),
            Err(e) => return Err(e.into()),
        };

        // Single-use: consume before the expiry check. A delete failure here
        // means a concurrent caller already consumed it; the rotation still
        // proceeds for this caller (last writer wins).
        if let Err(e) = self.refresh_tokens.delete(&token.token) {
            tracing::warn!(error = %e, "failed to consume refresh token");
        }

        if chrono::Utc::now() > token.expires_at {
            tracing::warn!(customer_id = %token.customer_id, "refresh with expired token");
            return Err(AuthError::RefreshTokenExpired);
        }

        let customer = self.customers.get_by_id(&token.customer_id)?;
        let access_token = self.signer.sign(&customer.id)?;
        let new_refresh_token = self.issue_refresh_token(&customer.id)?;

        tracing::info!(customer_id = %customer.id, "refresh token rotated");
        Ok(AuthSession {
            access_token,
            refresh_token: new_refresh_token.token,
            customer_id: customer.id,
        })
    }

    /// Validate a bearer access token and resolve the customer behind it.
    ///
    /// Fails with [`AuthError::InvalidToken`] on signature, algorithm, or
    /// expiry mismatch, and on blacklisted tokens.
    pub fn authenticate(&self, access_token: &str) -> Result<AuthenticatedCustomer, AuthError> {
        let claims = self.signer.verify(access_token)?;

        if self.blacklist.contains(access_token)? {
            tracing::warn!(customer_id = %claims.sub, "blacklisted token presented");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.into())
    }

    /// Issue a refresh token, enforcing the one-live-token-per-customer
    /// policy via explicit delete-then-create. No storage uniqueness
    /// constraint is assumed; concurrent logins interleave as last writer
    /// wins.
    fn issue_refresh_token(
        &self,
        customer_id: &str,
    ) -> Result<crate::models::RefreshToken, AuthError> {
        for existing in self.refresh_tokens.get_all()? {
            if existing.customer_id == customer_id {
                if let Err(e) = self.refresh_tokens.delete(&existing.token) {
                    tracing::warn!(error = %e, customer_id, "failed to delete superseded refresh token");
                }
            }
        }

        Ok(self.refresh_tokens.create(customer_id)?)
    }

    /// Add an access token to the blacklist, copying the expiry from its
    /// own `exp` claim. Already-blacklisted tokens are a successful no-op.
    fn blacklist_access_token(&self, access_token: &str) -> Result<(), AuthError> {
        if self.blacklist.contains(access_token)? {
            tracing::info!("token already blacklisted");
            return Ok(());
        }

        let claims = self.signer.verify(access_token)?;
        self.blacklist.create(access_token, claims.exp)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, RefreshToken};
    use crate::storage::memory::{
        MemoryBlacklistStore, MemoryCustomerStore, MemoryRefreshTokenStore,
    };
    use chrono::Utc;

    struct Harness {
        engine: AuthEngine,
        refresh_tokens: Arc<MemoryRefreshTokenStore>,
    }

    /// Plaintext hasher so tests do not pay argon2 cost per login.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, plaintext: &str) -> Result<String, super::super::password::PasswordHashError> {
            Ok(plaintext.to_string())
        }

        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            plaintext == hash
        }
    }

    fn harness() -> Harness {
        let customers = Arc::new(MemoryCustomerStore::new());
        customers
            .create(&Customer::new("alice", "correct-password"))
            .unwrap();

        let refresh_tokens = Arc::new(MemoryRefreshTokenStore::new());
        let engine = AuthEngine::new(
            customers,
            refresh_tokens.clone(),
            Arc::new(MemoryBlacklistStore::new()),
            Arc::new(PlainHasher),
            TokenSigner::new("payment-ledger", chrono::Duration::minutes(5), b"test-secret"),
        );

        Harness {
            engine,
            refresh_tokens,
        }
    }

    fn customer_id(harness: &Harness) -> String {
        harness.engine.customers.get_by_username("alice").unwrap().id
    }

    #[test]
    fn login_issues_token_with_customer_subject() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        let authed = h.engine.authenticate(&session.access_token).unwrap();
        assert_eq!(authed.customer_id, session.customer_id);
        assert_eq!(session.customer_id, customer_id(&h));
    }

    #[test]
    fn unknown_username_and_wrong_password_look_the_same() {
        let h = harness();

        let unknown = h.engine.login("nobody", "whatever").unwrap_err();
        let wrong = h.engine.login("alice", "wrong").unwrap_err();

        assert!(matches!(unknown, AuthError::BadCredentials));
        assert!(matches!(wrong, AuthError::BadCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn second_login_invalidates_previous_refresh_token() {
        let h = harness();
        let first = h.engine.login("alice", "correct-password").unwrap();
        let second = h.engine.login("alice", "correct-password").unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(matches!(
            h.engine.refresh(&first.refresh_token),
            Err(AuthError::RefreshTokenNotFound)
        ));
        assert!(h.engine.refresh(&second.refresh_token).is_ok());
    }

    #[test]
    fn refresh_is_single_use() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        let rotated = h.engine.refresh(&session.refresh_token).unwrap();
        assert_ne!(rotated.refresh_token, session.refresh_token);

        let again = h.engine.refresh(&session.refresh_token);
        assert!(matches!(again, Err(AuthError::RefreshTokenNotFound)));
    }

    #[test]
    fn expired_refresh_token_is_consumed_on_failure() {
        let h = harness();
        let id = customer_id(&h);
        h.refresh_tokens.insert(RefreshToken {
            token: "stale".to_string(),
            customer_id: id,
            expires_at: Utc::now() - chrono::Duration::hours(1),
        });

        let first = h.engine.refresh("stale");
        assert!(matches!(first, Err(AuthError::RefreshTokenExpired)));

        // Already deleted, so a retry cannot tell expiry from absence
        let second = h.engine.refresh("stale");
        assert!(matches!(second, Err(AuthError::RefreshTokenNotFound)));
    }

    #[test]
    fn authenticate_rejects_blacklisted_token() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        h.engine
            .logout(&session.access_token, &session.refresh_token)
            .unwrap();

        assert!(matches!(
            h.engine.authenticate(&session.access_token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn authenticate_rejects_foreign_and_garbage_tokens() {
        let h = harness();

        let foreign = TokenSigner::new("payment-ledger", chrono::Duration::minutes(5), b"other")
            .sign("cust-x")
            .unwrap();
        assert!(matches!(
            h.engine.authenticate(&foreign),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            h.engine.authenticate("garbage"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn double_logout_blacklists_once_but_fails_on_refresh_delete() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        h.engine
            .logout(&session.access_token, &session.refresh_token)
            .unwrap();

        // Blacklist insert is idempotent; the refresh token is already gone
        let second = h
            .engine
            .logout(&session.access_token, &session.refresh_token);
        assert!(matches!(second, Err(AuthError::RefreshTokenNotFound)));
    }

    #[test]
    fn logout_with_invalid_access_token_fails() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        let result = h.engine.logout("not-a-token", &session.refresh_token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));

        // Refresh token untouched by the failed logout
        assert!(h.engine.refresh(&session.refresh_token).is_ok());
    }

    #[test]
    fn refresh_reissues_for_the_same_customer() {
        let h = harness();
        let session = h.engine.login("alice", "correct-password").unwrap();

        let rotated = h.engine.refresh(&session.refresh_token).unwrap();
        assert_eq!(rotated.customer_id, session.customer_id);

        let authed = h.engine.authenticate(&rotated.access_token).unwrap();
        assert_eq!(authed.customer_id, session.customer_id);
    }
}
