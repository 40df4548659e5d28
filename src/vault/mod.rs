//! Vault module — credential storage.
//!
//! This module provides:
//! - `VaultEntry`, `SecretValue` and the on-disk `StoredEntry` (`entry`)
//! - JSON vault file format with atomic writes (`format`)
//! - High-level `VaultStore` for put/get/list/delete/export/rekey (`store`)

pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{SecretValue, StoredEntry, VaultEntry, DECRYPTION_FAILED_SENTINEL};
pub use store::{ExportReport, VaultStore};
