// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::{Policy, Role};

/// Claims carried by a session token.
///
/// The payload is readable by anyone holding the token, so it carries
/// identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Normalized email of the principal.
    pub email: String,
    pub role: Role,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the primary type used throughout the application to represent
/// the caller of a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub email: String,
    pub role: Role,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        }
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Evaluate `policy` for this caller against `subject`.
    pub fn may(&self, policy: Policy, subject: Option<&str>) -> bool {
        policy.evaluate(&self.email, self.role, subject).is_allowed()
    }
}
