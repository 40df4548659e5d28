use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, MIN_ITERATIONS};
use crate::errors::{PassVaultError, Result};
use crate::password::generator::{GenerateOptions, DEFAULT_LENGTH};

/// Configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backing file, relative to the working directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// PBKDF2 iteration count (default and minimum: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Length used by `generate` when `--length` is not given.
    #[serde(default = "default_length")]
    pub default_length: usize,

    /// Whether `generate` drops look-alike characters by default.
    #[serde(default)]
    pub exclude_ambiguous: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "passwords.json".to_string()
}

fn default_kdf_iterations() -> u32 {
    MIN_ITERATIONS
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf_iterations: default_kdf_iterations(),
            default_length: default_length(),
            exclude_ambiguous: false,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If it exists
    /// but cannot be parsed, or asks for too few KDF iterations, an
    /// error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.kdf_iterations < MIN_ITERATIONS {
            return Err(PassVaultError::ConfigError(format!(
                "kdf_iterations must be at least {MIN_ITERATIONS} (got {})",
                settings.kdf_iterations
            )));
        }

        Ok(settings)
    }

    /// Full path to the vault file.  An absolute `vault_file` is used as is.
    pub fn vault_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.vault_file)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
        }
    }

    /// Generator defaults taken from the config.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            length: self.default_length,
            exclude_ambiguous: self.exclude_ambiguous,
            ..GenerateOptions::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
