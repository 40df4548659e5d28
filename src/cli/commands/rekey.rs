//! `passvault rekey` — change the master password.
//!
//! Decrypts every entry with the current password and re-encrypts it
//! with the new one in a single atomic write.  Nothing is written if
//! any entry cannot be decrypted.

use crate::cli::output;
use crate::cli::{load_settings, open_store, prompt_new_master_password, Cli};
use crate::errors::Result;

/// Execute the `rekey` command.
pub fn execute(cli: &Cli, to_plaintext: bool) -> Result<()> {
    // 1. Open the vault with the current password.
    output::info("Enter your current master password.");
    let store = open_store(cli)?;

    // 2. Choose the new password (or none).
    let new_password = if to_plaintext {
        output::warning("Every password will be stored in plaintext.");
        None
    } else {
        output::info("Choose your new master password.");
        Some(prompt_new_master_password()?)
    };

    // 3. Re-encrypt and save atomically.
    let settings = load_settings()?;
    let new_store = store.rekey(
        new_password.as_ref().map(|pw| pw.as_str()),
        &settings.kdf_params(),
    )?;

    output::success(&format!(
        "Master password changed ({} password(s) re-encrypted)",
        new_store.entry_count()?
    ));

    Ok(())
}
