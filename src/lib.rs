// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! Payment Ledger - Customer Wallet & Transfer Service
//!
//! This crate provides a small payment-ledger API: customers register,
//! authenticate with short-lived access tokens, hold a wallet, and transfer
//! funds between wallets.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session lifecycle: token issuance, rotation, revocation
//! - `ledger` - Balance transfers and customer registration
//! - `storage` - JSON collection storage and store contracts

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
