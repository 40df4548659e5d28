//! `passvault list` — display all saved services in a table.

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `list` command.
///
/// Service names are never encrypted, so no master password is needed.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let store = VaultStore::plaintext(vault_path(cli, &settings)?);

    let services = store.list_services()?;
    output::info(&format!("{} saved service(s)", services.len()));
    output::print_services_table(&services);

    Ok(())
}
