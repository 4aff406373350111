// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Public views of custody records shared by the service layer and the HTTP
//! handlers. All types derive `Serialize` and `ToSchema` for JSON responses
//! and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Wallets**: the public fields of an employee wallet
//! - **Exports**: the one response type that carries a private key

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::storage::EmployeeRecord;

// =============================================================================
// Wallets
// =============================================================================

/// Public fields of an employee wallet. Never includes key material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWallet {
    pub email: String,
    /// EIP-55 checksummed address.
    #[schema(example = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf")]
    pub address: String,
    pub created_at: DateTime<Utc>,
    /// Last successful read of the wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl From<&EmployeeRecord> for EmployeeWallet {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            email: record.email.clone(),
            address: record.address.clone(),
            created_at: record.created_at,
            last_used: record.last_used,
        }
    }
}

// =============================================================================
// Exports
// =============================================================================

/// A decrypted private key on its way to an administrator.
///
/// Wiped from memory when dropped.
#[derive(Serialize, ToSchema, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct ExportedKey {
    pub email: String,
    pub address: String,
    /// `0x` + 64 hex characters.
    pub private_key: String,
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedKey")
            .field("email", &self.email)
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
