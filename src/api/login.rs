// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoints that mint session tokens.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{body::ApiJson, origin::ClientAddr};
use crate::{
    auth::{AuthError, Role},
    crypto::{verify_password, verify_without_hash},
    custody::normalize_email,
    error::ApiError,
    state::AppState,
    storage::{AdminRepository, AuditAction, AuditEvent, EmployeeRepository, StorageError},
};

/// Administrator credentials.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProfile {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    /// Bearer token, valid for 24 hours.
    pub token: String,
    pub admin: AdminProfile,
}

/// Employee login by provisioned email.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmployeeLoginRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeProfile {
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeLoginResponse {
    /// Bearer token, valid for 24 hours.
    pub token: String,
    pub employee: EmployeeProfile,
}

/// Log in as an administrator.
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    tag = "Auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AdminLoginResponse),
        (status = 400, description = "Email and password required"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    ClientAddr(origin): ClientAddr,
    ApiJson(request): ApiJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, Response> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password required").into_response());
    }
    let email = normalize_email(&request.email)
        .map_err(|e| ApiError::bad_request(e.to_string()).into_response())?;

    let failed = |reason: &str| {
        state.audit.record(
            AuditEvent::new(AuditAction::AdminLoginFailed)
                .with_admin(&email)
                .with_ip(origin.clone())
                .with_details(json!({ "reason": reason })),
        );
        tracing::info!(admin = %email, reason, "Admin login rejected");
        AuthError::InvalidCredentials.into_response()
    };

    let admin = match AdminRepository::new(&state.storage).get(&email) {
        Ok(admin) => Some(admin),
        Err(StorageError::NotFound(_)) => None,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load admin record");
            return Err(ApiError::internal("Login failed").into_response());
        }
    };

    // Argon2 verification is CPU-bound. Unknown admins pay the same cost as
    // a wrong password.
    let stored_hash = admin.as_ref().map(|a| a.password_hash.clone());
    let password = request.password;
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => Ok(verify_without_hash(&password)),
    })
    .await
    .map_err(|e| AuthError::InternalError(format!("password check task failed: {e}")))
    .and_then(|r| r.map_err(|e| AuthError::InternalError(e.to_string())))
    .map_err(IntoResponse::into_response)?;

    let admin = match admin {
        Some(admin) if verified => admin,
        Some(_) => return Err(failed("wrong_password")),
        None => return Err(failed("unknown_admin")),
    };

    let token = state
        .tokens
        .mint(&admin.email, Role::Admin)
        .map_err(IntoResponse::into_response)?;

    state.audit.record(
        AuditEvent::new(AuditAction::AdminLogin)
            .with_admin(&admin.email)
            .with_ip(origin.clone()),
    );
    tracing::info!(admin = %admin.email, "Admin logged in");

    Ok(Json(AdminLoginResponse {
        token,
        admin: AdminProfile {
            email: admin.email,
            role: Role::Admin,
        },
    }))
}

/// Log in as an employee with a provisioned wallet.
#[utoipa::path(
    post,
    path = "/api/auth/employee/login",
    tag = "Auth",
    request_body = EmployeeLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = EmployeeLoginResponse),
        (status = 400, description = "Email required"),
        (status = 404, description = "Employee wallet not found")
    )
)]
pub async fn employee_login(
    State(state): State<AppState>,
    ClientAddr(origin): ClientAddr,
    ApiJson(request): ApiJson<EmployeeLoginRequest>,
) -> Result<Json<EmployeeLoginResponse>, Response> {
    if request.email.trim().is_empty() {
        return Err(ApiError::bad_request("Email required").into_response());
    }
    let email = normalize_email(&request.email)
        .map_err(|e| ApiError::bad_request(e.to_string()).into_response())?;

    let employee = match EmployeeRepository::new(&state.storage).get(&email) {
        Ok(record) => record,
        Err(StorageError::NotFound(_)) => {
            return Err(ApiError::not_found("Employee wallet not found").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load employee record");
            return Err(ApiError::internal("Login failed").into_response());
        }
    };

    let token = state
        .tokens
        .mint(&employee.email, Role::Employee)
        .map_err(IntoResponse::into_response)?;

    state.audit.record(
        AuditEvent::new(AuditAction::EmployeeLogin)
            .with_employee(&employee.email)
            .with_ip(origin),
    );

    Ok(Json(EmployeeLoginResponse {
        token,
        employee: EmployeeProfile {
            email: employee.email,
            address: employee.address,
        },
    }))
}
