//! Key material held by an open vault.
//!
//! `DerivedKey` owns the 32 bytes produced by the KDF and wipes them on
//! drop.  `EncryptionContext` pairs that key with the field-level cipher
//! and is what a `VaultStore` holds when it was opened with a master
//! passphrase.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::encryption::{decode_token, decrypt, encode_token, encrypt};
use super::kdf::{derive_key_with_params, KdfParams, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// A wrapper around a 32-byte derived key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Encrypts and decrypts secret fields with one derived key.
///
/// Immutable once built: a different passphrase needs a new context.
#[derive(Debug)]
pub struct EncryptionContext {
    key: DerivedKey,
}

impl EncryptionContext {
    /// Derive the key for `passphrase` and build a context around it.
    pub fn from_passphrase(passphrase: &str, params: &KdfParams) -> Result<Self> {
        let mut bytes = derive_key_with_params(passphrase.as_bytes(), params)?;
        let key = DerivedKey::new(bytes);
        bytes.zeroize();
        Ok(Self { key })
    }

    /// Build a context from an already-derived key.
    pub fn from_key(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext secret into its stored text form.
    pub fn encrypt_secret(&self, plaintext: &str) -> Result<String> {
        let token = encrypt(self.key.as_bytes(), plaintext.as_bytes())?;
        Ok(encode_token(&token))
    }

    /// Decrypt the stored text form of a secret.
    ///
    /// Non-UTF-8 plaintext is wiped and reported as `DecryptionFailed`.
    pub fn decrypt_secret(&self, stored: &str) -> Result<Zeroizing<String>> {
        let token = decode_token(stored)?;
        let plaintext = decrypt(self.key.as_bytes(), &token)?;
        String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::DecryptionFailed
        })
    }
}
