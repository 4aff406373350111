// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Custody Module
//!
//! Wallet lifecycle for employees: provisioning, reads, listing and the
//! audited private key export.
//!
//! ## Request Flow
//!
//! ```text
//! caller ─▶ policy check ─▶ repository ─▶ cipher / keygen ─▶ audit ─▶ result
//! ```
//!
//! Policies are evaluated before any storage lookup, so a denied caller
//! learns nothing about whether a wallet exists.

pub mod email;
pub mod error;
pub mod service;

pub use email::normalize_email;
pub use error::CustodyError;
pub use service::CustodyService;
