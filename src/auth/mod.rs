// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session tokens and access policies for the custody API.
//!
//! ## Auth Flow
//!
//! 1. An administrator logs in with email + password, an employee with the
//!    email their wallet was provisioned under
//! 2. The server mints an HS256 token carrying `{email, role, iat, exp}`
//! 3. Clients send `Authorization: Bearer <token>`
//! 4. The server verifies signature and expiry, then evaluates the route's
//!    [`Policy`] against the caller before touching storage
//!
//! ## Security
//!
//! - All non-health, non-login endpoints require authentication
//! - Tokens live 24 hours and cannot be revoked server-side
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;
pub mod tokens;

pub use claims::{AuthenticatedUser, SessionClaims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::{Decision, Policy, Role};
pub use tokens::{TokenIssuer, SESSION_TTL_HOURS};
