// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Custody operation errors.

use thiserror::Error;

use crate::crypto::CipherError;
use crate::storage::StorageError;

/// Error type for custody operations.
///
/// `Integrity`, `Storage` and `Cipher` are internal failures; their detail is
/// logged but never returned to clients.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// Malformed input
    #[error("{0}")]
    Validation(String),
    /// Caller's role or identity does not satisfy the route policy
    #[error("Access denied")]
    Forbidden,
    /// No wallet for this employee
    #[error("Employee not found: {0}")]
    NotFound(String),
    /// A wallet already exists for this employee
    #[error("Employee already has a wallet: {0}")]
    Conflict(String),
    /// Stored key material failed verification
    #[error("Integrity check failed: {0}")]
    Integrity(String),
    /// Storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Sealing a new key failed
    #[error("Encryption error: {0}")]
    Cipher(#[from] CipherError),
}
