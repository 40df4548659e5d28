//! AES-256-GCM authenticated encryption of individual secret fields.
//!
//! Every call to `encrypt` draws a fresh 12-byte nonce from the OS
//! CSPRNG, so saving the same password twice produces two different
//! tokens.  The returned token is self-contained:
//!
//! ```text
//! [ 12-byte nonce | ciphertext | 16-byte auth tag ]
//! ```
//!
//! In the vault file a token is stored as standard base64 text (see
//! `encode_token` / `decode_token`).

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `nonce || ciphertext || tag`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    token.extend_from_slice(&nonce);
    token.extend_from_slice(&ciphertext);
    Ok(token)
}

/// Decrypt a token produced by `encrypt`.
///
/// A wrong key, a truncated token, or any modified byte yields
/// `DecryptionFailed`; garbled plaintext is never returned.
pub fn decrypt(key: &[u8], token: &[u8]) -> Result<Vec<u8>> {
    if token.len() < NONCE_LEN + TAG_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = token.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PassVaultError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)
}

/// Render a binary token as the text stored in the vault file.
pub fn encode_token(token: &[u8]) -> String {
    BASE64.encode(token)
}

/// Parse the text form of a token.  Text that is not valid base64 is
/// treated like any other corrupted token.
pub fn decode_token(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text.trim())
        .map_err(|_| PassVaultError::DecryptionFailed)
}
