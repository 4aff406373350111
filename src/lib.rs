// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet Custody Server - Custodial Employee Wallet Service
//!
//! Issues an EVM wallet to each employee, keeps the private key sealed under
//! a master secret, and gates every read and export behind signed session
//! tokens and an append-only audit log.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session tokens, roles and access policies
//! - `blockchain` - secp256k1 key generation and address checks
//! - `crypto` - Envelope encryption and password hashing
//! - `custody` - Wallet lifecycle operations
//! - `storage` - JSON file store and audit log

pub mod api;
pub mod auth;
pub mod blockchain;
pub mod bootstrap;
pub mod config;
pub mod crypto;
pub mod custody;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
