// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{EmployeeWallet, ExportedKey},
    state::AppState,
    storage::{AuditAction, AuditEvent},
};

pub mod audit;
pub mod body;
pub mod health;
pub mod login;
pub mod origin;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/admin/login", post(login::admin_login))
        .route("/auth/employee/login", post(login::employee_login))
        .route("/wallets", get(wallets::list_wallets))
        .route("/wallets/create", post(wallets::create_wallet))
        .route("/wallets/{email}", get(wallets::get_wallet))
        .route("/wallets/export/{email}", post(wallets::export_private_key))
        .route("/audit", get(audit::list_audit_logs));

    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::admin_login,
        login::employee_login,
        wallets::create_wallet,
        wallets::get_wallet,
        wallets::list_wallets,
        wallets::export_private_key,
        audit::list_audit_logs,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Role,
            EmployeeWallet,
            ExportedKey,
            AuditAction,
            AuditEvent,
            login::AdminLoginRequest,
            login::AdminLoginResponse,
            login::AdminProfile,
            login::EmployeeLoginRequest,
            login::EmployeeLoginResponse,
            login::EmployeeProfile,
            wallets::CreateWalletRequest,
            wallets::CreateWalletResponse,
            wallets::WalletEnvelope,
            wallets::WalletListResponse,
            audit::AuditLogResponse,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session token issuance"),
        (name = "Wallets", description = "Employee wallet custody"),
        (name = "Audit", description = "Audit log access"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::ensure_default_admin;
    use crate::state::test_support::{TestContext, TEST_ADMIN_EMAIL};
    use crate::storage::{FileAuditSink, FileStorage, MemoryAuditSink, StoragePaths};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADMIN_PASSWORD: &str = "admin123";

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create(app: &Router, token: &str, email: &str) -> (StatusCode, Value) {
        send(
            app,
            Method::POST,
            "/api/wallets/create",
            Some(token),
            Some(json!({ "email": email })),
        )
        .await
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_endpoints_respond() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());

        let (status, body) = send(&app, Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["storage"], "ok");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());

        let (status, body) = send(&app, Method::GET, "/api-doc/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/wallets/export/{email}"].is_object());
        assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());

        let (status, body) = send(&app, Method::GET, "/api/wallets", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "missing_auth_header");

        let (status, body) =
            send(&app, Method::GET, "/api/wallets/bob@x.com", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "malformed_token");
    }

    #[tokio::test]
    async fn authorization_matrix() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        let admin = ctx.admin_token();

        assert_eq!(create(&app, &admin, "bob@x.com").await.0, StatusCode::CREATED);
        assert_eq!(create(&app, &admin, "alice@x.com").await.0, StatusCode::CREATED);

        let bob = ctx.employee_token("bob@x.com");

        // Employee: self only.
        let (status, _) = send(&app, Method::GET, "/api/wallets/bob@x.com", Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) =
            send(&app, Method::GET, "/api/wallets/alice@x.com", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, Method::GET, "/api/wallets", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(create(&app, &bob, "carol@x.com").await.0, StatusCode::FORBIDDEN);
        let (status, _) =
            send(&app, Method::GET, "/api/audit", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Admin: everything.
        let (status, _) =
            send(&app, Method::GET, "/api/wallets/alice@x.com", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, Method::GET, "/api/wallets", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employees"].as_array().unwrap().len(), 2);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/wallets/export/alice@x.com",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["privateKey"].as_str().unwrap().starts_with("0x"));
    }

    #[tokio::test]
    async fn bob_scenario() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        let admin = ctx.admin_token();

        let (status, body) = create(&app, &admin, "bob@x.com").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["employee"]["email"], "bob@x.com");
        let address = body["employee"]["address"].as_str().unwrap().to_string();
        assert!(body["employee"].get("privateKey").is_none());

        let bob = ctx.employee_token("bob@x.com");
        let (status, body) = send(&app, Method::GET, "/api/wallets/bob@x.com", Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee"]["address"], address);
        assert!(body["employee"]["lastUsed"].is_string());

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/wallets/export/bob@x.com",
            Some(&bob),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(ctx.audit.count(AuditAction::PrivateKeyExported), 0);
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        let admin = ctx.admin_token();

        assert_eq!(create(&app, &admin, "bob@x.com").await.0, StatusCode::CREATED);
        let (status, body) = create(&app, &admin, "bob@x.com").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, _) = create(&app, &admin, "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_wallet_is_404() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        let admin = ctx.admin_token();

        let (status, body) =
            send(&app, Method::GET, "/api/wallets/ghost@x.com", Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Wallet not found");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        let admin = ctx.admin_token();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/wallets/create",
            Some(&admin),
            Some(json!({ "email": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/wallets/create")
            .header(header::AUTHORIZATION, format!("Bearer {admin}"))
            .body(Body::from(r#"{"email":"bob@x.com"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/employee/login",
            None,
            Some(json!(["bob@x.com"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(ctx.audit.count(AuditAction::WalletCreated), 0);
    }

    #[tokio::test]
    async fn admin_login_flow() {
        let ctx = TestContext::new();
        ensure_default_admin(&ctx.state.storage, TEST_ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let app = router(ctx.state.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/admin/login",
            None,
            Some(json!({ "email": "Admin@Company.com", "password": ADMIN_PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["admin"]["role"], "admin");
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = send(&app, Method::GET, "/api/wallets", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ctx.audit.count(AuditAction::AdminLogin), 1);
    }

    #[tokio::test]
    async fn wrong_admin_password_is_rejected() {
        let ctx = TestContext::new();
        ensure_default_admin(&ctx.state.storage, TEST_ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let app = router(ctx.state.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/admin/login",
            None,
            Some(json!({ "email": TEST_ADMIN_EMAIL, "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());
        assert_eq!(body["error_code"], "invalid_credentials");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/admin/login",
            None,
            Some(json!({ "email": TEST_ADMIN_EMAIL })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(ctx.audit.count(AuditAction::AdminLoginFailed), 1);
        assert_eq!(ctx.audit.count(AuditAction::AdminLogin), 0);
        assert_eq!(ctx.audit.count(AuditAction::PrivateKeyExported), 0);
    }

    #[tokio::test]
    async fn unknown_admin_is_rejected_like_wrong_password() {
        let ctx = TestContext::new();
        ensure_default_admin(&ctx.state.storage, TEST_ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
        let app = router(ctx.state.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/admin/login",
            None,
            Some(json!({ "email": "nobody@company.com", "password": ADMIN_PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_credentials");
        assert!(body.get("token").is_none());

        let failures: Vec<_> = ctx
            .audit
            .events()
            .into_iter()
            .filter(|e| e.action == AuditAction::AdminLoginFailed)
            .collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].admin_email.as_deref(), Some("nobody@company.com"));
        assert_eq!(failures[0].details.as_ref().unwrap()["reason"], "unknown_admin");
    }

    #[tokio::test]
    async fn employee_login_flow() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());
        create(&app, &ctx.admin_token(), "bob@x.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/employee/login",
            None,
            Some(json!({ "email": "bob@x.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();
        assert!(body["employee"]["address"].is_string());

        let (status, _) =
            send(&app, Method::GET, "/api/wallets/bob@x.com", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/employee/login",
            None,
            Some(json!({ "email": "ghost@x.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(ctx.audit.count(AuditAction::EmployeeLogin), 1);
    }

    #[tokio::test]
    async fn export_succeeds_when_audit_sink_fails() {
        let ctx = TestContext::new();
        let broken = Arc::new(FileAuditSink::new(Arc::new(FileStorage::new(
            StoragePaths::new("/nonexistent/audit-root"),
        ))));
        let state = ctx.state.clone().with_audit_sink(broken);
        let app = router(state);
        let admin = ctx.admin_token();

        assert_eq!(create(&app, &admin, "bob@x.com").await.0, StatusCode::CREATED);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/wallets/export/bob@x.com",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "bob@x.com");

        // Listing from the broken sink surfaces as a server error.
        let (status, _) = send(&app, Method::GET, "/api/audit", Some(&admin), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn audit_endpoint_lists_newest_first_with_limit() {
        let ctx = TestContext::new();
        let memory = Arc::new(MemoryAuditSink::new());
        let app = router(ctx.state.clone().with_audit_sink(memory.clone()));
        let admin = ctx.admin_token();

        create(&app, &admin, "bob@x.com").await;
        send(&app, Method::POST, "/api/wallets/export/bob@x.com", Some(&admin), None).await;

        let (status, body) = send(&app, Method::GET, "/api/audit", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let logs = body["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["action"], "PRIVATE_KEY_EXPORTED");
        assert_eq!(logs[0]["adminEmail"], TEST_ADMIN_EMAIL);
        assert_eq!(logs[1]["action"], "WALLET_CREATED");

        let (_, body) = send(&app, Method::GET, "/api/audit?limit=1", Some(&admin), None).await;
        assert_eq!(body["logs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn forwarded_address_reaches_audit_entry() {
        let ctx = TestContext::new();
        let app = router(ctx.state.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/wallets/create")
            .header(header::AUTHORIZATION, format!("Bearer {}", ctx.admin_token()))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", "198.51.100.4")
            .body(Body::from(json!({ "email": "bob@x.com" }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = ctx.audit.events().pop().unwrap();
        assert_eq!(created.action, AuditAction::WalletCreated);
        assert_eq!(created.ip_address.as_deref(), Some("198.51.100.4"));
    }
}
