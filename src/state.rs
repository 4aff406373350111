// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::TokenIssuer,
    crypto::CipherService,
    custody::CustodyService,
    storage::{AuditSink, FileAuditSink, FileStorage},
};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<FileStorage>,
    pub custody: Arc<CustodyService>,
    pub tokens: Arc<TokenIssuer>,
    pub audit: Arc<dyn AuditSink>,
    cipher: CipherService,
}

impl AppState {
    /// Build the state over initialized storage, auditing to the file store.
    pub fn new(storage: FileStorage, cipher: CipherService, tokens: TokenIssuer) -> Self {
        let storage = Arc::new(storage);
        let audit: Arc<dyn AuditSink> = Arc::new(FileAuditSink::new(Arc::clone(&storage)));
        Self {
            custody: Arc::new(CustodyService::new(
                Arc::clone(&storage),
                cipher.clone(),
                Arc::clone(&audit),
            )),
            storage,
            tokens: Arc::new(tokens),
            audit,
            cipher,
        }
    }

    /// Swap the audit sink used by every component.
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.custody = Arc::new(CustodyService::new(
            Arc::clone(&self.storage),
            self.cipher.clone(),
            Arc::clone(&audit),
        ));
        self.audit = audit;
        self
    }
}
