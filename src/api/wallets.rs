// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet custody API endpoints.
//!
//! Provisioning, listing and key export are admin-only. An employee may read
//! their own wallet; an admin may read any.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{body::ApiJson, origin::ClientAddr};
use crate::{
    auth::Auth,
    error::ApiError,
    models::{EmployeeWallet, ExportedKey},
    state::AppState,
};

/// Request to provision a wallet for an employee.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWalletRequest {
    #[serde(default)]
    #[schema(example = "bob@x.com")]
    pub email: String,
}

/// Response after creating a wallet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateWalletResponse {
    pub success: bool,
    pub employee: EmployeeWallet,
}

/// Response containing one wallet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletEnvelope {
    pub employee: EmployeeWallet,
}

/// Response containing every wallet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletListResponse {
    /// Newest first.
    pub employees: Vec<EmployeeWallet>,
}

/// Provision a wallet for an employee.
///
/// Generates a secp256k1 keypair, seals the private key and stores it with
/// the derived address. Returns public fields only.
#[utoipa::path(
    post,
    path = "/api/wallets/create",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    request_body = CreateWalletRequest,
    responses(
        (status = 201, description = "Wallet created", body = CreateWalletResponse),
        (status = 400, description = "Invalid email"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Employee already has a wallet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_wallet(
    Auth(user): Auth,
    State(state): State<AppState>,
    ClientAddr(origin): ClientAddr,
    ApiJson(request): ApiJson<CreateWalletRequest>,
) -> Result<(StatusCode, Json<CreateWalletResponse>), ApiError> {
    let employee = state
        .custody
        .create_wallet(&user, &request.email, origin)
        .map_err(|e| ApiError::from_custody(e, "Failed to create wallet"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateWalletResponse {
            success: true,
            employee,
        }),
    ))
}

/// Get an employee's wallet.
#[utoipa::path(
    get,
    path = "/api/wallets/{email}",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    params(
        ("email" = String, Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Wallet details", body = WalletEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your wallet"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn get_wallet(
    Auth(user): Auth,
    State(state): State<AppState>,
    ClientAddr(origin): ClientAddr,
    Path(email): Path<String>,
) -> Result<Json<WalletEnvelope>, ApiError> {
    let employee = state
        .custody
        .fetch_wallet(&user, &email, origin)
        .map_err(|e| ApiError::from_custody(e, "Failed to fetch wallet"))?;

    Ok(Json(WalletEnvelope { employee }))
}

/// List every employee wallet.
#[utoipa::path(
    get,
    path = "/api/wallets",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All wallets", body = WalletListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_wallets(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<WalletListResponse>, ApiError> {
    let employees = state
        .custody
        .list_wallets(&user)
        .map_err(|e| ApiError::from_custody(e, "Failed to list wallets"))?;

    Ok(Json(WalletListResponse { employees }))
}

/// Export an employee's private key.
///
/// Every successful call is recorded in the audit log before the key is
/// returned.
#[utoipa::path(
    post,
    path = "/api/wallets/export/{email}",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    params(
        ("email" = String, Path, description = "Employee email")
    ),
    responses(
        (status = 200, description = "Decrypted private key", body = ExportedKey),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "Stored key failed verification")
    )
)]
pub async fn export_private_key(
    Auth(user): Auth,
    State(state): State<AppState>,
    ClientAddr(origin): ClientAddr,
    Path(email): Path<String>,
) -> Result<Json<ExportedKey>, ApiError> {
    let exported = state
        .custody
        .export_private_key(&user, &email, origin)
        .map_err(|e| ApiError::from_custody(e, "Failed to export private key"))?;

    Ok(Json(exported))
}
