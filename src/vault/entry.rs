//! Credential records as seen by callers and as stored on disk.
//!
//! `VaultEntry` is what `VaultStore::get` hands back: the secret has
//! already been decrypted (or marked undecryptable).  `StoredEntry` is
//! the serialized shape inside the vault file, where `password` holds
//! either plaintext or a base64 ciphertext token depending on the mode
//! the vault was written in.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::format::deserialize_timestamp;

/// Display text substituted for a secret that could not be decrypted.
///
/// It is not secret and is safe to print or export.
pub const DECRYPTION_FAILED_SENTINEL: &str = "[decryption failed]";

/// A secret value after the vault has tried to read it.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretValue {
    /// The plaintext secret.
    Plain(String),
    /// The stored token could not be decrypted with the current key.
    Undecryptable,
}

impl SecretValue {
    /// The plaintext, or `None` if decryption failed.
    pub fn expose(&self) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s.as_str()),
            Self::Undecryptable => None,
        }
    }

    /// Text to show or export: the plaintext, or the sentinel.
    pub fn as_display(&self) -> &str {
        self.expose().unwrap_or(DECRYPTION_FAILED_SENTINEL)
    }

    pub fn is_undecryptable(&self) -> bool {
        matches!(self, Self::Undecryptable)
    }
}

impl Drop for SecretValue {
    fn drop(&mut self) {
        if let Self::Plain(s) = self {
            s.zeroize();
        }
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("Plain([REDACTED])"),
            Self::Undecryptable => f.write_str("Undecryptable"),
        }
    }
}

/// One service's credential record, with its secret readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub service: String,
    pub username: String,
    pub secret: SecretValue,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record exactly as it appears in the vault (or export) file.
///
/// The service name is the key of the enclosing JSON object, so it is
/// not repeated here.  Every field defaults so hand-edited files with
/// missing keys still load.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(default)]
    pub username: String,

    /// Plaintext secret, or a base64 token when the vault is encrypted.
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for StoredEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredEntry")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl Drop for StoredEntry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
