// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain key material for EVM-compatible chains.
//!
//! This module provides functionality for:
//! - Generating secp256k1 keypairs and their addresses
//! - Checking that a recovered private key still controls its address

pub mod keygen;
pub mod signing;

pub use keygen::{address_from_signing_key, generate_keypair, KeyMaterial};
pub use signing::{key_matches_address, SigningError};
