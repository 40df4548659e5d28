//! `passvault set` — add or update a saved password.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, open_store, Cli};
use crate::errors::{PassVaultError, Result};
use crate::password::{generate, score};

/// Execute the `set` command.
pub fn execute(cli: &Cli, service: &str, username: &str, notes: &str, gen: bool) -> Result<()> {
    let secret = if gen {
        let settings = load_settings()?;
        Zeroizing::new(generate(&settings.generate_options())?)
    } else {
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {service}"))
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let report = score(&secret);

    let store = open_store(cli)?;
    let existed = store.list_services()?.iter().any(|s| s == service);
    store.put(service, username, &secret, notes)?;

    if existed {
        output::success(&format!("Password for '{service}' updated"));
    } else {
        output::success(&format!("Password for '{service}' saved"));
    }
    if gen {
        output::info("Generated a new password. Use `passvault get` to see it.");
    }
    println!("Strength: {} ({}/100)", output::styled_band(report.band), report.score);

    if !store.is_encrypted() {
        output::warning("Stored without a master password (plaintext).");
    }

    Ok(())
}
