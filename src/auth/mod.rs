// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! # Authentication Module
//!
//! Session lifecycle for the ledger API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with username/password and receives:
//!    - a short-lived HS256-signed access token (`sub` = customer id)
//!    - an opaque single-use refresh token (24 h lifetime)
//! 2. Protected requests send `Authorization: Bearer <access token>`; the
//!    server verifies signature, algorithm, and expiry, then checks the
//!    revocation blacklist.
//! 3. `refresh` consumes the presented refresh token - win or lose - and on
//!    success issues a brand-new token pair (rotation).
//! 4. `logout` blacklists the access token and deletes the refresh token.
//!
//! ## Security
//!
//! - Token verification is pinned to HMAC-SHA256; any other algorithm is
//!   rejected as invalid.
//! - At most one live refresh token exists per customer: issuing a new one
//!   first deletes every token the customer already holds.
//! - A blacklisted access token stays unusable until its own expiry and
//!   beyond; the blacklist is never consulted-around.

pub mod claims;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AccessClaims, AuthenticatedCustomer};
pub use engine::{AuthEngine, AuthSession};
pub use error::AuthError;
pub use extractor::Auth;
pub use password::{Argon2Hasher, PasswordHasher};
pub use tokens::TokenSigner;
