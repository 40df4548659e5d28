//! `passvault get` — show a saved password.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str) -> Result<()> {
    let store = open_store(cli)?;

    match store.get(service)? {
        Some(entry) => {
            output::print_entry(&entry);
            if entry.secret.is_undecryptable() {
                output::warning("The password could not be decrypted — wrong master password?");
            }
        }
        None => output::error(&format!("No password saved for '{service}'")),
    }

    Ok(())
}
