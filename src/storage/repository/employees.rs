// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Employee wallet records.
//!
//! ## Storage Layout
//!
//! One JSON document per employee:
//! ```text
//! /data/employees/{sha256(email)}.json
//! ```
//!
//! The document carries the public address and the sealed private key
//! envelope. The plaintext key never reaches this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageError, StorageResult};
use crate::crypto::Envelope;

/// Stored employee wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Normalized email, the record's identity.
    pub email: String,
    /// EIP-55 checksummed address.
    pub address: String,
    /// Sealed private key.
    #[serde(flatten)]
    pub envelope: Envelope,
    pub created_at: DateTime<Utc>,
    /// Last successful read of this wallet.
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

/// Repository for employee wallet records.
pub struct EmployeeRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if an employee record exists.
    pub fn exists(&self, email: &str) -> bool {
        self.storage
            .exists(self.storage.paths().employee_record(email))
    }

    /// Get an employee record by normalized email.
    pub fn get(&self, email: &str) -> StorageResult<EmployeeRecord> {
        let path = self.storage.paths().employee_record(email);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Employee {email}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a new employee record.
    ///
    /// # Returns
    /// - `Ok(())` if this call created the record
    /// - `Err(StorageError::AlreadyExists)` if a record for the email exists,
    ///   including one written concurrently by another request
    pub fn create(&self, record: &EmployeeRecord) -> StorageResult<()> {
        let path = self.storage.paths().employee_record(&record.email);
        self.storage
            .create_json(path, record)
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("Employee {}", record.email))
                }
                other => other,
            })
    }

    /// Stamp `last_used` and return the updated record.
    pub fn touch_last_used(&self, email: &str, at: DateTime<Utc>) -> StorageResult<EmployeeRecord> {
        let mut record = self.get(email)?;
        record.last_used = Some(at);
        self.storage
            .write_json(self.storage.paths().employee_record(email), &record)?;
        Ok(record)
    }

    /// All employee records, newest first.
    ///
    /// Unreadable documents are logged and skipped.
    pub fn list_all(&self) -> StorageResult<Vec<EmployeeRecord>> {
        let files = self
            .storage
            .list_json_files(self.storage.paths().employees_dir())?;

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            match self.storage.read_json::<EmployeeRecord>(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable employee record");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
