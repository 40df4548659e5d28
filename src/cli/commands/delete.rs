//! `passvault delete` — remove a saved password.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the password for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Deleting never touches a secret, so no master password is needed.
    let settings = load_settings()?;
    let store = VaultStore::plaintext(vault_path(cli, &settings)?);

    if store.delete(service)? {
        output::success(&format!("Deleted the password for '{service}'"));
    } else {
        output::error(&format!("No password saved for '{service}'"));
    }

    Ok(())
}
