// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! secp256k1 key generation and EVM address derivation.

use alloy::primitives::{keccak256, Address};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::rand_core::OsRng;
use zeroize::Zeroizing;

/// A freshly generated keypair.
///
/// The private key is held in a zeroizing buffer so it is wiped as soon as
/// the caller drops it (normally right after encrypting it).
pub struct KeyMaterial {
    /// `0x` + 64 lowercase hex characters.
    pub private_key: Zeroizing<String>,
    /// EIP-55 checksummed address.
    pub address: String,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

/// Generate a secp256k1 keypair and derive its address.
///
/// `SigningKey::random` draws from the OS RNG and rejects scalars outside
/// `[1, n)`, so the result is always a valid curve key.
pub fn generate_keypair() -> KeyMaterial {
    let signing_key = SigningKey::random(&mut OsRng);

    let key_hex = Zeroizing::new(hex::encode(signing_key.to_bytes().as_slice()));
    let private_key = Zeroizing::new(format!("0x{}", key_hex.as_str()));
    let address = address_from_signing_key(&signing_key).to_checksum(None);

    KeyMaterial {
        private_key,
        address,
    }
}

/// Derive the EVM address controlled by `signing_key`.
///
/// 1. Take the uncompressed public key (`0x04 || x || y`, 65 bytes)
/// 2. keccak256 the 64 coordinate bytes
/// 3. Keep the last 20 bytes of the hash
pub fn address_from_signing_key(signing_key: &SigningKey) -> Address {
    let public_key = signing_key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_address(value: &str) -> bool {
        value.len() == 42
            && value.starts_with("0x")
            && value[2..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn generates_valid_address_and_key() {
        let material = generate_keypair();

        assert!(is_address(&material.address), "bad address {}", material.address);
        assert!(material.private_key.starts_with("0x"));
        assert_eq!(material.private_key.len(), 66);
        assert!(material.private_key[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn address_is_checksummed() {
        let material = generate_keypair();
        let parsed: Address = material.address.parse().unwrap();
        assert_eq!(parsed.to_checksum(None), material.address);
    }

    #[test]
    fn known_vector_derives_expected_address() {
        // Private key 1 controls the well-known generator-point address.
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let signing_key = SigningKey::from_slice(&bytes).unwrap();

        assert_eq!(
            address_from_signing_key(&signing_key).to_checksum(None),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn generated_keys_are_unique() {
        let mut addresses = HashSet::new();
        let mut keys = HashSet::new();
        for _ in 0..20 {
            let material = generate_keypair();
            assert!(addresses.insert(material.address.clone()));
            assert!(keys.insert(material.private_key.as_str().to_owned()));
        }
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let material = generate_keypair();
        let rendered = format!("{material:?}");
        assert!(!rendered.contains(&material.private_key[2..]));
        assert!(rendered.contains(&material.address));
    }
}
