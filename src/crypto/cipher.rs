// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Envelope encryption for custodial private keys.
//!
//! Every private key is sealed with AES-256-GCM under the process-wide
//! master secret before it touches storage.
//!
//! ## Envelope Format
//!
//! ```text
//! encryptedPrivateKey  hex(ciphertext)      same length as the plaintext
//! iv                   hex([u8; 16])        fresh from the OS RNG per call
//! authTag              hex([u8; 16])        GCM tag over the ciphertext
//! ```
//!
//! The IV is 16 bytes rather than GCM's customary 12, which the cipher
//! absorbs through GHASH when deriving the initial counter block.
//!
//! ## Failure Semantics
//!
//! Decryption fails closed: a wrong key, a flipped bit in any of the three
//! fields, malformed hex or a mis-sized IV/tag all yield
//! [`CipherError::Integrity`] and no plaintext is released.

use aes_gcm::{
    aead::{consts::U16, rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    aes::Aes256,
    AesGcm, Nonce, Tag,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Master secret length in bytes (AES-256).
pub const MASTER_KEY_LEN: usize = 32;

/// Initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Errors produced by the cipher service.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The master secret has the wrong length.
    #[error("master key must be exactly 32 bytes")]
    InvalidKeyLength,

    /// The AEAD refused to seal the plaintext.
    #[error("encryption failed")]
    Encryption,

    /// Authentication failed; the envelope was tampered with, corrupted, or
    /// sealed under a different key.
    #[error("envelope failed integrity verification")]
    Integrity,
}

/// An encrypted private key as persisted alongside an employee record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Hex-encoded ciphertext.
    #[serde(rename = "encryptedPrivateKey")]
    pub ciphertext: String,
    /// Hex-encoded 16-byte initialization vector.
    pub iv: String,
    /// Hex-encoded 16-byte authentication tag.
    pub auth_tag: String,
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("ciphertext_len", &(self.ciphertext.len() / 2))
            .field("iv", &self.iv)
            .finish_non_exhaustive()
    }
}

/// Symmetric cipher bound to the master secret.
#[derive(Clone)]
pub struct CipherService {
    cipher: Aes256Gcm16,
}

impl CipherService {
    /// Create a cipher service keyed by `master_key`.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidKeyLength`] unless the key is exactly
    /// [`MASTER_KEY_LEN`] bytes.
    pub fn new(master_key: &[u8]) -> Result<Self, CipherError> {
        if master_key.len() != MASTER_KEY_LEN {
            return Err(CipherError::InvalidKeyLength);
        }
        let cipher =
            Aes256Gcm16::new_from_slice(master_key).map_err(|_| CipherError::InvalidKeyLength)?;
        Ok(Self { cipher })
    }

    /// Seal `plaintext` under a fresh random IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Envelope, CipherError> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut buffer = Zeroizing::new(plaintext.to_vec());
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
            .map_err(|_| CipherError::Encryption)?;

        Ok(Envelope {
            ciphertext: hex::encode(buffer.as_slice()),
            iv: hex::encode(iv),
            auth_tag: hex::encode(tag),
        })
    }

    /// Open an envelope, verifying its tag before releasing any plaintext.
    pub fn decrypt(&self, envelope: &Envelope) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        let iv = hex::decode(&envelope.iv).map_err(|_| CipherError::Integrity)?;
        let tag = hex::decode(&envelope.auth_tag).map_err(|_| CipherError::Integrity)?;
        if iv.len() != IV_LEN || tag.len() != TAG_LEN {
            return Err(CipherError::Integrity);
        }

        let mut buffer =
            Zeroizing::new(hex::decode(&envelope.ciphertext).map_err(|_| CipherError::Integrity)?);

        self.cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(&iv),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(&tag),
            )
            .map_err(|_| CipherError::Integrity)?;

        Ok(buffer)
    }
}
