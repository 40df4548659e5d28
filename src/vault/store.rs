//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` keeps no records in memory.  Every operation reads the
//! backing file, works on that snapshot, and (for mutations) writes the
//! whole file back atomically, so the file on disk is always the source
//! of truth.  Two processes writing the same file at once can lose an
//! update; there is no locking.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::kdf::KdfParams;
use crate::crypto::keys::EncryptionContext;
use crate::errors::{PassVaultError, Result};

use super::entry::{SecretValue, StoredEntry, VaultEntry};
use super::format::{self, VaultData};

/// Outcome of `VaultStore::export_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of entries written to the export file.
    pub exported: usize,
    /// How many of those carry the sentinel instead of a secret.
    pub undecryptable: usize,
}

/// Handle on one vault file, optionally bound to a master passphrase.
#[derive(Debug)]
pub struct VaultStore {
    /// Path to the JSON vault file on disk.
    path: PathBuf,

    /// Present when the vault was opened with a master passphrase.
    encryption: Option<EncryptionContext>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Bind a store to `path`, deriving the key from `master_passphrase`
    /// with default KDF parameters.  `None` means plaintext mode.
    ///
    /// Nothing is read or written until the first operation.
    pub fn new(path: impl Into<PathBuf>, master_passphrase: Option<&str>) -> Result<Self> {
        Self::with_params(path, master_passphrase, &KdfParams::default())
    }

    /// Like `new`, with explicit KDF parameters (from `Settings`).
    pub fn with_params(
        path: impl Into<PathBuf>,
        master_passphrase: Option<&str>,
        params: &KdfParams,
    ) -> Result<Self> {
        let encryption = master_passphrase
            .map(|p| EncryptionContext::from_passphrase(p, params))
            .transpose()?;
        Ok(Self {
            path: path.into(),
            encryption,
        })
    }

    /// A store that keeps secrets as plaintext.
    pub fn plaintext(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encryption: None,
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add or overwrite the entry for `service`.
    ///
    /// Overwriting keeps the original `created_at`; `updated_at` is
    /// always set to now.  The secret is encrypted when a master
    /// passphrase is bound.
    pub fn put(&self, service: &str, username: &str, secret: &str, notes: &str) -> Result<()> {
        Self::validate_service(service)?;

        let mut data = self.load()?;
        let now = Utc::now();

        let created_at = data.get(service).map_or(now, |existing| existing.created_at);
        let existed = data.contains_key(service);

        let entry = StoredEntry {
            username: username.to_string(),
            password: self.seal(secret)?,
            notes: notes.to_string(),
            created_at,
            updated_at: now,
        };
        data.insert(service.to_string(), entry);

        self.save(&data)?;
        debug!(service, updated = existed, "stored entry");
        Ok(())
    }

    /// Look up the entry for `service`.
    ///
    /// Returns `Ok(None)` when there is no such service.  A secret that
    /// cannot be decrypted comes back as `SecretValue::Undecryptable`
    /// rather than an error.
    pub fn get(&self, service: &str) -> Result<Option<VaultEntry>> {
        let data = self.load()?;
        Ok(data
            .get(service)
            .map(|stored| self.open_entry(service, stored)))
    }

    /// All service names, sorted.
    pub fn list_services(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Number of entries in the vault.
    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Remove the entry for `service`.
    ///
    /// Returns `false` (and leaves the file untouched) if it did not exist.
    pub fn delete(&self, service: &str) -> Result<bool> {
        let mut data = self.load()?;
        if data.remove(service).is_none() {
            return Ok(false);
        }
        self.save(&data)?;
        debug!(service, "deleted entry");
        Ok(true)
    }

    /// Write every entry, with **plaintext secrets**, to `target`.
    ///
    /// This deliberately defeats encryption at rest: the export file is
    /// readable by anyone who can read `target`.  Secrets that cannot be
    /// decrypted are written as the sentinel; one bad entry never aborts
    /// the export.  An existing file at `target` is overwritten.
    pub fn export_all(&self, target: &Path) -> Result<ExportReport> {
        if format::resolve_path(target) == format::resolve_path(&self.path) {
            return Err(PassVaultError::InvalidRequest(
                "refusing to export over the vault file itself".into(),
            ));
        }

        let data = self.load()?;
        let mut undecryptable = 0;

        let exported: VaultData = data
            .iter()
            .map(|(service, stored)| {
                let value = self.reveal(service, &stored.password);
                if value.is_undecryptable() {
                    undecryptable += 1;
                }
                let password = value.as_display().to_string();
                let entry = StoredEntry {
                    username: stored.username.clone(),
                    password,
                    notes: stored.notes.clone(),
                    created_at: stored.created_at,
                    updated_at: stored.updated_at,
                };
                (service.clone(), entry)
            })
            .collect();

        format::write_vault(target, &exported)?;

        let report = ExportReport {
            exported: exported.len(),
            undecryptable,
        };
        debug!(
            exported = report.exported,
            undecryptable = report.undecryptable,
            dest = %target.display(),
            "exported vault in plaintext"
        );
        Ok(report)
    }

    /// Re-encrypt every entry under `new_passphrase` (`None` = plaintext).
    ///
    /// All entries are decrypted with the current key first.  If any of
    /// them cannot be, nothing is written and `RekeyBlocked` lists the
    /// affected services.  Timestamps are kept.  Returns a store bound to
    /// the new passphrase.
    pub fn rekey(&self, new_passphrase: Option<&str>, params: &KdfParams) -> Result<VaultStore> {
        let data = self.load()?;

        let mut blocked = Vec::new();
        let mut plaintexts: Vec<(String, Zeroizing<String>)> = Vec::with_capacity(data.len());
        for (service, stored) in &data {
            let value = self.reveal(service, &stored.password);
            match value.expose() {
                Some(plain) => plaintexts.push((service.clone(), Zeroizing::new(plain.to_string()))),
                None => blocked.push(service.clone()),
            }
        }
        if !blocked.is_empty() {
            return Err(PassVaultError::RekeyBlocked(blocked));
        }

        let new_store = Self::with_params(self.path.clone(), new_passphrase, params)?;

        let mut rekeyed = VaultData::new();
        for (service, plaintext) in &plaintexts {
            let stored = &data[service];
            let entry = StoredEntry {
                username: stored.username.clone(),
                password: new_store.seal(plaintext)?,
                notes: stored.notes.clone(),
                created_at: stored.created_at,
                updated_at: stored.updated_at,
            };
            rekeyed.insert(service.clone(), entry);
        }

        new_store.save(&rekeyed)?;
        debug!(
            entries = rekeyed.len(),
            encrypted = new_store.is_encrypted(),
            "re-keyed vault"
        );
        Ok(new_store)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a master passphrase is bound.
    pub fn is_encrypted(&self) -> bool {
        self.encryption.is_some()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn load(&self) -> Result<VaultData> {
        let data = format::read_vault(&self.path)?;
        debug!(path = %self.path.display(), entries = data.len(), "loaded vault");
        Ok(data)
    }

    fn save(&self, data: &VaultData) -> Result<()> {
        format::write_vault(&self.path, data)?;
        debug!(path = %self.path.display(), entries = data.len(), "saved vault");
        Ok(())
    }

    /// Turn a plaintext secret into its stored form.
    fn seal(&self, secret: &str) -> Result<String> {
        match &self.encryption {
            Some(ctx) => ctx.encrypt_secret(secret),
            None => Ok(secret.to_string()),
        }
    }

    /// Turn a stored secret back into a `SecretValue`.
    fn reveal(&self, service: &str, stored: &str) -> SecretValue {
        match &self.encryption {
            None => SecretValue::Plain(stored.to_string()),
            Some(ctx) => match ctx.decrypt_secret(stored) {
                Ok(plain) => SecretValue::Plain(plain.as_str().to_string()),
                Err(_) => {
                    warn!(service, "entry could not be decrypted with the current key");
                    SecretValue::Undecryptable
                }
            },
        }
    }

    fn open_entry(&self, service: &str, stored: &StoredEntry) -> VaultEntry {
        VaultEntry {
            service: service.to_string(),
            username: stored.username.clone(),
            secret: self.reveal(service, &stored.password),
            notes: stored.notes.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    /// Service names are the primary key and must be non-empty.
    fn validate_service(service: &str) -> Result<()> {
        if service.trim().is_empty() {
            return Err(PassVaultError::InvalidRequest(
                "service name cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
