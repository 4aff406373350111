// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Email normalization.
//!
//! Emails are identities here, so every comparison and every storage key
//! uses the normalized form: trimmed and lower-cased.

use super::CustodyError;

/// Longest address accepted (RFC 5321 path limit).
const MAX_EMAIL_LEN: usize = 254;

/// Normalize and validate an email address.
pub fn normalize_email(raw: &str) -> Result<String, CustodyError> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err(CustodyError::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(CustodyError::Validation("Email is too long".to_string()));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
                && !email.chars().any(|c| c.is_whitespace() || c.is_control())
        }
        None => false,
    };

    if !valid {
        return Err(CustodyError::Validation("Invalid email address".to_string()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_email("  Bob@X.com ").unwrap(), "bob@x.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "bob",
            "@x.com",
            "bob@",
            "bob@x",
            "bob@@x.com",
            "bob@x..com",
            "bo b@x.com",
            "bob@x.com.",
        ] {
            assert!(
                matches!(normalize_email(bad), Err(CustodyError::Validation(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_overlong_addresses() {
        let long = format!("{}@x.com", "a".repeat(250));
        assert!(matches!(normalize_email(&long), Err(CustodyError::Validation(_))));
    }
}
