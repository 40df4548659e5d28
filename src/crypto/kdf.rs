//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The salt is a fixed constant, so the same passphrase always yields
//! the same key.  Vault files therefore carry no KDF metadata and any
//! store opened with the right passphrase can read them.  The iteration
//! count is configurable (`kdf_iterations` in `.passvault.toml`) but never
//! drops below `MIN_ITERATIONS`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::errors::{PassVaultError, Result};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Fixed salt shared by every vault.
const FIXED_SALT: &[u8] = b"salt_";

/// Minimum number of PBKDF2 rounds accepted.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Configurable PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 rounds (default: 100 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key from a passphrase using the default parameters.
pub fn derive_key(passphrase: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(passphrase, &KdfParams::default())
}

/// Derive a 32-byte key with explicit parameters.
///
/// An empty passphrase is accepted and derives a weak key; rejecting it
/// is left to the front-end.
pub fn derive_key_with_params(passphrase: &[u8], params: &KdfParams) -> Result<[u8; KEY_LEN]> {
    if params.iterations < MIN_ITERATIONS {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, FIXED_SALT, params.iterations, &mut key);
    Ok(key)
}
