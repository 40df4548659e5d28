//! `passvault export` — write every password, decrypted, to a JSON file.
//!
//! The export file holds plaintext secrets.  Anyone who can read it can
//! read every password; this is the point of exporting, not a bug.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `export` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let store = open_store(cli)?;

    output::warning(&format!(
        "{file} will contain every password in plaintext. Keep it safe and delete it when done."
    ));

    let target = std::env::current_dir()?.join(file);
    let report = store.export_all(&target)?;

    output::success(&format!(
        "Exported {} password(s) to {file}",
        report.exported
    ));
    if report.undecryptable > 0 {
        output::warning(&format!(
            "{} password(s) could not be decrypted and were exported as placeholders.",
            report.undecryptable
        ));
    }

    Ok(())
}
