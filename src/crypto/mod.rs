// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Cryptography Module
//!
//! - `cipher` - Envelope encryption of private keys under the master secret
//! - `password` - Administrator password hashing
//!
//! Key generation and address derivation live in [`crate::blockchain`].

pub mod cipher;
pub mod password;

pub use cipher::{CipherError, CipherService, Envelope, IV_LEN, MASTER_KEY_LEN, TAG_LEN};
pub use password::{hash_password, verify_password, verify_without_hash, PasswordError};
