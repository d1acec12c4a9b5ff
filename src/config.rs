// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup into an explicit
//! [`AppConfig`] value that is injected into the engines at construction.
//! There is no process-wide mutable configuration state, so tests can build
//! isolated configurations per case.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APPLICATION_NAME` | JWT issuer / application name | `payment-ledger` |
//! | `SERVER_HOST` | Server bind address | `0.0.0.0` |
//! | `SERVER_PORT` | Server bind port | `8081` |
//! | `ACCESS_TOKEN_TTL_MINUTES` | Access-token lifetime in minutes | `5` |
//! | `JWT_SIGNATURE_KEY` | HMAC-SHA256 signing secret | `secret` (dev only) |
//! | `DATA_DIR` | Root directory for JSON collections | `./data` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! The refresh-token lifetime is a separate hardcoded 24-hour constant (see
//! `storage::repository::REFRESH_TOKEN_TTL_HOURS`), deliberately distinct
//! from the configurable access-token TTL.

use std::env;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Default access-token lifetime in minutes.
const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 5;

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name, also used as the JWT `iss` claim.
    pub application_name: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Access-token lifetime.
    pub access_token_ttl: chrono::Duration,
    /// HMAC-SHA256 signing secret for access tokens.
    pub jwt_signature_key: Vec<u8>,
    /// Root directory for the JSON collection files.
    pub data_dir: PathBuf,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let ttl_minutes = parse_ttl_minutes(
            env::var("ACCESS_TOKEN_TTL_MINUTES").ok().as_deref(),
        );

        Self {
            application_name: get_env("APPLICATION_NAME", "payment-ledger"),
            host: get_env("SERVER_HOST", "0.0.0.0"),
            port: get_env("SERVER_PORT", "8081").parse().unwrap_or(8081),
            access_token_ttl: chrono::Duration::minutes(ttl_minutes),
            jwt_signature_key: get_env("JWT_SIGNATURE_KEY", "secret").into_bytes(),
            data_dir: PathBuf::from(get_env("DATA_DIR", "./data")),
            log_format: LogFormat::from_str_lossy(&get_env("LOG_FORMAT", "pretty")),
        }
    }
}

impl Default for AppConfig {
    /// Default configuration, matching the documented env defaults.
    fn default() -> Self {
        Self {
            application_name: "payment-ledger".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8081,
            access_token_ttl: chrono::Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES),
            jwt_signature_key: b"secret".to_vec(),
            data_dir: PathBuf::from("./data"),
            log_format: LogFormat::Pretty,
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a TTL value in minutes, falling back to the default on anything
/// unparseable or non-positive.
fn parse_ttl_minutes(value: Option<&str>) -> i64 {
    match value.and_then(|v| v.parse::<i64>().ok()) {
        Some(minutes) if minutes > 0 => minutes,
        _ => DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
    }
}
