// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Administrator password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, which carry the salt and parameters.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a candidate password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Run a full verification for a principal with no stored hash.
///
/// Checks `password` against a throwaway hash so the rejection costs as much
/// as a wrong password. Always returns `false`.
pub fn verify_without_hash(password: &str) -> bool {
    static THROWAWAY: OnceLock<Option<String>> = OnceLock::new();

    let hash = THROWAWAY.get_or_init(|| hash_password("no-such-principal").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}
