// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Custody operations.
//!
//! | Operation            | Policy        | Audit action           |
//! |----------------------|---------------|------------------------|
//! | `create_wallet`      | `AdminOnly`   | `WALLET_CREATED`       |
//! | `fetch_wallet`       | `SelfOrAdmin` | `WALLET_ACCESSED`      |
//! | `list_wallets`       | `AdminOnly`   | -                      |
//! | `export_private_key` | `AdminOnly`   | `PRIVATE_KEY_EXPORTED` |

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use zeroize::Zeroizing;

use super::{normalize_email, CustodyError};
use crate::{
    auth::{AuthenticatedUser, Policy},
    blockchain::{generate_keypair, key_matches_address},
    crypto::{CipherError, CipherService},
    models::{EmployeeWallet, ExportedKey},
    storage::{
        AuditAction, AuditEvent, AuditSink, EmployeeRecord, EmployeeRepository, FileStorage,
        StorageError,
    },
};

/// Composes storage, the cipher and the audit sink into the wallet lifecycle.
pub struct CustodyService {
    storage: Arc<FileStorage>,
    cipher: CipherService,
    audit: Arc<dyn AuditSink>,
}

impl CustodyService {
    pub fn new(storage: Arc<FileStorage>, cipher: CipherService, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            storage,
            cipher,
            audit,
        }
    }

    fn employees(&self) -> EmployeeRepository<'_> {
        EmployeeRepository::new(&self.storage)
    }

    fn authorize(
        &self,
        caller: &AuthenticatedUser,
        policy: Policy,
        subject: Option<&str>,
    ) -> Result<(), CustodyError> {
        if caller.may(policy, subject) {
            Ok(())
        } else {
            tracing::info!(
                caller = %caller.email,
                role = %caller.role,
                ?policy,
                "Custody operation denied"
            );
            Err(CustodyError::Forbidden)
        }
    }

    /// Provision a wallet for `email`.
    ///
    /// The keypair is generated, sealed and written in one exclusive create,
    /// so a wallet is either fully present or absent.
    pub fn create_wallet(
        &self,
        actor: &AuthenticatedUser,
        email: &str,
        origin: Option<String>,
    ) -> Result<EmployeeWallet, CustodyError> {
        self.authorize(actor, Policy::AdminOnly, None)?;
        let email = normalize_email(email)?;

        let repo = self.employees();
        if repo.exists(&email) {
            return Err(CustodyError::Conflict(email));
        }

        let material = generate_keypair();
        let envelope = self.cipher.encrypt(material.private_key.as_bytes())?;
        drop(material.private_key);

        let record = EmployeeRecord {
            email: email.clone(),
            address: material.address,
            envelope,
            created_at: Utc::now(),
            last_used: None,
        };

        repo.create(&record).map_err(|e| match e {
            StorageError::AlreadyExists(_) => CustodyError::Conflict(email.clone()),
            other => CustodyError::Storage(other),
        })?;

        self.audit.record(
            AuditEvent::new(AuditAction::WalletCreated)
                .with_employee(&email)
                .with_admin(&actor.email)
                .with_ip(origin)
                .with_details(json!({ "address": record.address })),
        );

        tracing::info!(
            employee = %email,
            address = %record.address,
            admin = %actor.email,
            "Wallet created"
        );

        Ok(EmployeeWallet::from(&record))
    }

    /// Read the public fields of a wallet and stamp its `last_used`.
    pub fn fetch_wallet(
        &self,
        caller: &AuthenticatedUser,
        email: &str,
        origin: Option<String>,
    ) -> Result<EmployeeWallet, CustodyError> {
        let email = normalize_email(email)?;
        self.authorize(caller, Policy::SelfOrAdmin, Some(&email))?;

        let record = self
            .employees()
            .touch_last_used(&email, Utc::now())
            .map_err(|e| match e {
                StorageError::NotFound(_) => CustodyError::NotFound(email.clone()),
                other => CustodyError::Storage(other),
            })?;

        let mut event = AuditEvent::new(AuditAction::WalletAccessed)
            .with_employee(&email)
            .with_ip(origin)
            .with_details(json!({ "accessedBy": caller.email }));
        if caller.is_admin() {
            event = event.with_admin(&caller.email);
        }
        self.audit.record(event);

        Ok(EmployeeWallet::from(&record))
    }

    /// All wallets, newest first.
    pub fn list_wallets(&self, actor: &AuthenticatedUser) -> Result<Vec<EmployeeWallet>, CustodyError> {
        self.authorize(actor, Policy::AdminOnly, None)?;

        let records = self.employees().list_all()?;
        Ok(records.iter().map(EmployeeWallet::from).collect())
    }

    /// Decrypt and hand out an employee's private key.
    ///
    /// The key is verified against the stored address, and the export is
    /// recorded in the audit log before the response value exists.
    pub fn export_private_key(
        &self,
        actor: &AuthenticatedUser,
        email: &str,
        origin: Option<String>,
    ) -> Result<ExportedKey, CustodyError> {
        self.authorize(actor, Policy::AdminOnly, None)?;
        let email = normalize_email(email)?;

        let record = self.employees().get(&email).map_err(|e| match e {
            StorageError::NotFound(_) => CustodyError::NotFound(email.clone()),
            other => CustodyError::Storage(other),
        })?;

        let plaintext = self.cipher.decrypt(&record.envelope).map_err(|e| match e {
            CipherError::Integrity => CustodyError::Integrity(format!("envelope for {email}")),
            other => CustodyError::Cipher(other),
        })?;
        let private_key = Zeroizing::new(
            String::from_utf8(plaintext.to_vec())
                .map_err(|_| CustodyError::Integrity(format!("key encoding for {email}")))?,
        );

        match key_matches_address(&private_key, &record.address) {
            Ok(true) => {}
            Ok(false) => {
                return Err(CustodyError::Integrity(format!(
                    "key does not control stored address for {email}"
                )))
            }
            Err(e) => return Err(CustodyError::Integrity(format!("{e} for {email}"))),
        }

        self.audit.record(
            AuditEvent::new(AuditAction::PrivateKeyExported)
                .with_employee(&email)
                .with_admin(&actor.email)
                .with_ip(origin)
                .with_details(json!({ "address": record.address })),
        );

        tracing::warn!(
            employee = %email,
            admin = %actor.email,
            "Private key exported"
        );

        Ok(ExportedKey {
            email,
            address: record.address,
            private_key: private_key.as_str().to_owned(),
        })
    }
}
