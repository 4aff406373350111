// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup provisioning of the initial administrator.

use chrono::Utc;
use thiserror::Error;

use crate::{
    auth::Role,
    crypto::{hash_password, PasswordError},
    custody::{normalize_email, CustodyError},
    storage::{AdminRecord, AdminRepository, FileStorage, StorageError},
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid admin email: {0}")]
    Email(#[from] CustodyError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Create the configured administrator unless one already exists.
///
/// Returns `true` if an account was created.
pub fn ensure_default_admin(
    storage: &FileStorage,
    email: &str,
    password: &str,
) -> Result<bool, BootstrapError> {
    let email = normalize_email(email)?;
    let repo = AdminRepository::new(storage);

    if repo.exists(&email) {
        tracing::debug!(admin = %email, "Administrator already provisioned");
        return Ok(false);
    }

    let record = AdminRecord {
        email: email.clone(),
        password_hash: hash_password(password)?,
        role: Role::Admin,
        created_at: Utc::now(),
    };

    match repo.create(&record) {
        Ok(()) => {}
        // Another process provisioned it first.
        Err(StorageError::AlreadyExists(_)) => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    tracing::warn!(
        admin = %email,
        "Created default administrator; change its password before production use"
    );
    Ok(true)
}
