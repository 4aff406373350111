// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the file store.
//!
//! Each repository covers one record type and goes through [`FileStorage`]
//! for all file operations.
//!
//! [`FileStorage`]: super::FileStorage

pub mod admins;
pub mod employees;

pub use admins::{AdminRecord, AdminRepository};
pub use employees::{EmployeeRecord, EmployeeRepository};
