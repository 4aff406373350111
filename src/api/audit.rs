// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit log query endpoint (admin only).

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{auth::AdminOnly, error::ApiError, state::AppState, storage::AuditEvent};

/// Default number of entries returned.
pub const DEFAULT_AUDIT_LIMIT: usize = 100;
/// Upper bound on `limit`.
pub const MAX_AUDIT_LIMIT: usize = 1000;

/// Query parameters for audit log queries.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQueryParams {
    /// Maximum number of results (default 100, capped at 1000).
    pub limit: Option<usize>,
}

/// Response for audit log queries.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditLogResponse {
    /// Newest entries first.
    pub logs: Vec<AuditEvent>,
}

/// List recent audit entries.
#[utoipa::path(
    get,
    path = "/api/audit",
    tag = "Audit",
    security(("bearer_auth" = [])),
    params(AuditQueryParams),
    responses(
        (status = 200, description = "Recent audit entries", body = AuditLogResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_audit_logs(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Query(params): Query<AuditQueryParams>,
) -> Result<Json<AuditLogResponse>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .min(MAX_AUDIT_LIMIT);

    let logs = state.audit.list(limit).map_err(|e| {
        tracing::error!(error = %e, admin = %admin.email, "Failed to read audit log");
        ApiError::internal("Failed to read audit log")
    })?;

    Ok(Json(AuditLogResponse { logs }))
}
