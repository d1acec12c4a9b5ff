// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

use std::net::SocketAddr;
use std::sync::Arc;

use payment_ledger::api::router;
use payment_ledger::config::AppConfig;
use payment_ledger::logging;
use payment_ledger::state::AppState;
use payment_ledger::storage::{JsonStore, StoragePaths};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    logging::init("info,tower_http=debug", config.log_format);

    let mut store = JsonStore::new(StoragePaths::new(&config.data_dir));
    store
        .initialize()
        .expect("Failed to initialize storage directory");

    let state = AppState::new(Arc::new(store), &config);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, data_dir = %config.data_dir.display(), "payment-ledger listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
