// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the storage layout.
//!
//! Principals are keyed by a SHA-256 digest of their normalized email so
//! that arbitrary email text never becomes part of a filesystem path.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Filename stem for a principal's record.
pub fn principal_key(email: &str) -> String {
    hex::encode(Sha256::digest(email.as_bytes()))
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Employee Paths ==========

    /// Directory containing all employee wallet records.
    pub fn employees_dir(&self) -> PathBuf {
        self.root.join("employees")
    }

    /// Path to an employee's wallet record.
    pub fn employee_record(&self, email: &str) -> PathBuf {
        self.employees_dir()
            .join(format!("{}.json", principal_key(email)))
    }

    // ========== Administrator Paths ==========

    /// Directory containing administrator records.
    pub fn admins_dir(&self) -> PathBuf {
        self.root.join("admins")
    }

    /// Path to an administrator record.
    pub fn admin_record(&self, email: &str) -> PathBuf {
        self.admins_dir().join(format!("{}.json", principal_key(email)))
    }

    // ========== Audit Log Paths ==========

    /// Directory containing audit logs.
    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("audit")
    }

    /// Directory for a specific date's audit logs.
    pub fn audit_date_dir(&self, date: &str) -> PathBuf {
        self.audit_dir().join(date)
    }

    /// Path to a daily audit events file (JSONL format).
    pub fn audit_events_file(&self, date: &str) -> PathBuf {
        self.audit_date_dir(date).join("events.jsonl")
    }
}
