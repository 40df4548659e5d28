//! `passvault check` — score a password without storing it.

use crate::cli::output;
use crate::errors::{PassVaultError, Result};
use crate::password::score;

/// Execute the `check` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let report = match password {
        Some(pw) => {
            output::warning("Password provided on command line — it may appear in shell history.");
            score(pw)
        }
        None => {
            let pw = zeroize::Zeroizing::new(
                dialoguer::Password::new()
                    .with_prompt("Password to check")
                    .allow_empty_password(true)
                    .interact()
                    .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?,
            );
            score(&pw)
        }
    };

    output::print_strength(&report);
    Ok(())
}
