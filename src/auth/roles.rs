// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Roles and access policies.
//!
//! Policy evaluation is a pure function of the caller and the subject, so it
//! runs before any storage lookup and never depends on whether the subject
//! exists.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access to every wallet, key export and the audit log
/// - `Employee` - Can read only their own wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Custody administrator
    Admin,
    /// Wallet holder
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Per-endpoint access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Only administrators.
    AdminOnly,
    /// Administrators, or the employee the request is about.
    SelfOrAdmin,
}

impl Policy {
    /// Decide whether `caller_email` acting as `caller_role` may act on `subject`.
    ///
    /// Emails are compared as given; callers pass normalized values.
    pub fn evaluate(self, caller_email: &str, caller_role: Role, subject: Option<&str>) -> Decision {
        let allowed = match (self, caller_role) {
            (_, Role::Admin) => true,
            (Policy::AdminOnly, Role::Employee) => false,
            (Policy::SelfOrAdmin, Role::Employee) => subject == Some(caller_email),
        };

        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}
