// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit logging for privileged custody operations.
//!
//! Wallet creation, wallet reads, key exports and logins are recorded
//! through the [`AuditSink`] capability. Recording is best-effort: a sink
//! that cannot persist an event reports it on the `audit` tracing target and
//! the calling request carries on.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FileStorage, StorageResult};

/// Types of auditable events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    // Wallet events
    WalletCreated,
    WalletAccessed,
    PrivateKeyExported,

    // Auth events
    AdminLogin,
    AdminLoginFailed,
    EmployeeLogin,
}

/// An audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Unique event ID.
    pub event_id: String,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    /// Employee the event concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_email: Option<String>,
    /// Administrator who performed the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    /// Client address of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Additional details as JSON.
    #[schema(value_type = Option<Object>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    /// Create a new audit event stamped with the current time.
    pub fn new(action: AuditAction) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action,
            employee_email: None,
            admin_email: None,
            ip_address: None,
            details: None,
        }
    }

    pub fn with_employee(mut self, email: impl Into<String>) -> Self {
        self.employee_email = Some(email.into());
        self
    }

    pub fn with_admin(mut self, email: impl Into<String>) -> Self {
        self.admin_email = Some(email.into());
        self
    }

    /// Set the client address, if one is known.
    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    /// Add details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Destination for audit events.
///
/// `record` must not fail or panic; implementations swallow their own errors.
pub trait AuditSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: AuditEvent);

    /// Most recent events first, at most `limit` of them.
    fn list(&self, limit: usize) -> StorageResult<Vec<AuditEvent>>;
}

/// Repository for audit events stored as daily JSONL files.
pub struct AuditRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> AuditRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Append an event to the log file for its day.
    pub fn log(&self, event: &AuditEvent) -> StorageResult<()> {
        let date = event.timestamp.format("%Y-%m-%d").to_string();
        let path = self.storage.paths().audit_events_file(&date);

        let line = serde_json::to_vec(event)?;
        self.storage.append_line(path, &line)
    }

    /// Read audit events for a specific date, in write order.
    ///
    /// Lines that fail to parse are skipped.
    pub fn read_events(&self, date: &str) -> StorageResult<Vec<AuditEvent>> {
        let path = self.storage.paths().audit_events_file(date);
        let content = self.storage.read_raw(&path)?;

        let events = content
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .filter_map(|line| match serde_json::from_slice::<AuditEvent>(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(target: "audit", date, error = %e, "Skipping unreadable audit line");
                    None
                }
            })
            .collect();

        Ok(events)
    }

    /// Newest events first across all days, at most `limit`.
    pub fn recent(&self, limit: usize) -> StorageResult<Vec<AuditEvent>> {
        let mut dates = self.storage.list_dirs(self.storage.paths().audit_dir())?;
        dates.sort_unstable_by(|a, b| b.cmp(a));

        let mut events = Vec::new();
        for date in dates {
            if events.len() >= limit {
                break;
            }
            let day = match self.read_events(&date) {
                Ok(day) => day,
                Err(super::StorageError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            };
            events.extend(day.into_iter().rev());
        }

        events.truncate(limit);
        Ok(events)
    }
}

/// Durable sink writing through [`AuditRepository`].
pub struct FileAuditSink {
    storage: Arc<FileStorage>,
}

impl FileAuditSink {
    pub fn new(storage: Arc<FileStorage>) -> Self {
        Self { storage }
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Err(e) = AuditRepository::new(&self.storage).log(&event) {
            tracing::error!(
                target: "audit",
                event_id = %event.event_id,
                action = ?event.action,
                error = %e,
                "Failed to write audit event"
            );
        }
    }

    fn list(&self, limit: usize) -> StorageResult<Vec<AuditEvent>> {
        AuditRepository::new(&self.storage).recent(limit)
    }
}

/// In-process sink, used by tests.
#[derive(Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, action: AuditAction) -> usize {
        self.events()
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn list(&self, limit: usize) -> StorageResult<Vec<AuditEvent>> {
        let events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}
