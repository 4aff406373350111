// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Administrator accounts.
//!
//! ```text
//! /data/admins/{sha256(email)}.json
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageError, StorageResult};
use crate::auth::Role;

/// Stored administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Repository for administrator records.
pub struct AdminRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> AdminRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, email: &str) -> bool {
        self.storage.exists(self.storage.paths().admin_record(email))
    }

    /// Get an administrator by normalized email.
    pub fn get(&self, email: &str) -> StorageResult<AdminRecord> {
        let path = self.storage.paths().admin_record(email);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Admin {email}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a new administrator; fails with `AlreadyExists` if present.
    pub fn create(&self, record: &AdminRecord) -> StorageResult<()> {
        self.storage
            .create_json(self.storage.paths().admin_record(&record.email), record)
    }
}
