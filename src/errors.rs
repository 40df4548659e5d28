use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
///
/// Messages never carry secret values, so any variant is safe to print.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Request errors ---
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong master password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault file {} is unreadable: {reason}", .path.display())]
    Storage { path: PathBuf, reason: String },

    #[error(
        "Cannot change the master password — these entries cannot be decrypted: {}",
        join_services(.0)
    )]
    RekeyBlocked(Vec<String>),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

fn join_services(services: &[String]) -> String {
    services.join(", ")
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
