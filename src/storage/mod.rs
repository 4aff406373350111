// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Durable state lives in plain JSON files under `DATA_DIR`. Private keys are
//! sealed by the cipher service before they are handed to this layer.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   employees/
//!     {sha256(email)}.json    # address + sealed private key
//!   admins/
//!     {sha256(email)}.json    # password hash + role
//!   audit/
//!     {date}/events.jsonl     # Daily audit logs
//! ```
//!
//! ## Write Guarantees
//!
//! - Records are never partially visible (temp file, then rename or link)
//! - Creating a record that already exists fails, even under concurrency
//! - Audit logs are append-only

pub mod audit;
pub mod file_store;
pub mod paths;
pub mod repository;

pub use audit::{
    AuditAction, AuditEvent, AuditRepository, AuditSink, FileAuditSink, MemoryAuditSink,
};
pub use file_store::{FileStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{AdminRecord, AdminRepository, EmployeeRecord, EmployeeRepository};
