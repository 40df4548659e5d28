//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// PassVault CLI: local password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local password vault with encrypted storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .passvault.toml, else passwords.json)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Do not use a master password; secrets are stored in plaintext
    #[arg(long, global = true)]
    pub plaintext: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate random passwords
    Generate {
        /// Password length (default: 12, or `default_length` from config)
        #[arg(short, long)]
        length: Option<usize>,

        /// Leave out lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out digits
        #[arg(long)]
        no_digits: bool,

        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,

        /// Leave out look-alike characters (l, o, I, O, 0, 1)
        #[arg(long)]
        exclude_ambiguous: bool,

        /// Number of passwords to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Check the strength of a password
    Check {
        /// Password to check (omit for a hidden prompt)
        password: Option<String>,
    },

    /// Save a password (add or update)
    Set {
        /// Service or site name (e.g. github)
        service: String,

        /// Username for the service
        #[arg(short, long, default_value = "")]
        username: String,

        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Generate the password instead of prompting for it
        #[arg(short, long)]
        generate: bool,
    },

    /// Show a saved password
    Get {
        /// Service name
        service: String,
    },

    /// List saved services
    List,

    /// Delete a saved password
    Delete {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export all passwords, decrypted, to a JSON file
    Export {
        /// Output file path
        file: String,
    },

    /// Change the master password (re-encrypts every entry)
    Rekey {
        /// Decrypt everything and stop using a master password
        #[arg(long)]
        to_plaintext: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.passvault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file: `--file` wins over the config.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.file {
        Some(file) => cwd.join(file),
        None => settings.vault_path(&cwd),
    })
}

/// Ask for the master password without echo.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

    if pw.is_empty() {
        output::warning("Empty master password — the derived key is weak.");
    }
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `rekey`).
pub fn prompt_new_master_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("New master password")
        .with_confirmation(
            "Confirm new master password",
            "Passwords do not match, try again",
        )
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

    if pw.is_empty() {
        output::warning("Empty master password — the derived key is weak.");
    }
    Ok(Zeroizing::new(pw))
}

/// Open the vault named by the CLI args.
///
/// Prompts for the master password unless `--plaintext` was given.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    if cli.plaintext {
        return Ok(VaultStore::plaintext(path));
    }

    let password = prompt_master_password()?;
    VaultStore::with_params(path, Some(password.as_str()), &settings.kdf_params())
}
