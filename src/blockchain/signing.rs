// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signer reconstruction for custodial keys.
//!
//! A decrypted private key is only handed out after it has been loaded into
//! a local signer and shown to control the address stored next to it.

use std::str::FromStr;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    /// The text is not a valid secp256k1 private key.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// The stored address does not parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Build a local signer from a hex private key (with or without `0x`).
pub fn signer_from_hex(private_key: &str) -> Result<PrivateKeySigner, SigningError> {
    PrivateKeySigner::from_str(private_key).map_err(|_| SigningError::InvalidPrivateKey)
}

/// Whether `private_key` controls `address` (case-insensitive comparison).
pub fn key_matches_address(private_key: &str, address: &str) -> Result<bool, SigningError> {
    let expected =
        Address::from_str(address).map_err(|e| SigningError::InvalidAddress(e.to_string()))?;
    let signer = signer_from_hex(private_key)?;
    Ok(signer.address() == expected)
}
