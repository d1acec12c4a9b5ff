// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledger Works

//! HTTP API surface.
//!
//! Routes under `/api/auth` are public; the customer and transaction routes
//! require a bearer access token, enforced by the `Auth` extractor in each
//! protected handler.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod customers;
pub mod health;
pub mod transactions;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/customers/{id}", get(customers::get_customer))
        .route("/transactions", post(transactions::create_transaction))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::logout,
        auth::refresh_token,
        customers::get_customer,
        transactions::create_transaction
    ),
    components(
        schemas(
            health::HealthResponse,
            auth::CredentialsRequest,
            auth::AuthResponse,
            auth::RefreshTokenRequest,
            auth::MessageResponse,
            customers::CustomerResponse,
            transactions::CreateTransactionRequest,
            transactions::TransactionResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Auth", description = "Registration and session lifecycle"),
        (name = "Customers", description = "Customer records"),
        (name = "Transactions", description = "Wallet-to-wallet transfers")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::memory_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(memory_state());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_responds_without_auth() {
        let app = router(memory_state());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_rejects_missing_bearer() {
        let app = router(memory_state());

        let response = app
            .oneshot(
                Request::get("/api/customers/some-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn register_login_and_authenticated_lookup_end_to_end() {
        let app = router(memory_state());

        let register = Request::post("/api/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
            .unwrap();
        let response = app.clone().oneshot(register).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let login = Request::post("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
            .unwrap();
        let response = app.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let auth: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let token = auth["access_token"].as_str().unwrap();
        let customer_id = auth["customer_id"].as_str().unwrap();

        let lookup = Request::get(format!("/api/customers/{customer_id}"))
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(lookup).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let customer: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(customer["username"], "alice");
        assert_eq!(customer["balance"], 0.0);
    }
}
