//! `passvault generate` — print random passwords with their strength.

use crate::cli::load_settings;
use crate::cli::output;
use crate::errors::Result;
use crate::password::{generate_many, score, Charset};

/// Execute the `generate` command.
///
/// `length` and `exclude_ambiguous` fall back to the config defaults.
pub fn execute(
    length: Option<usize>,
    charset: Charset,
    exclude_ambiguous: bool,
    count: usize,
) -> Result<()> {
    let settings = load_settings()?;
    let mut options = settings.generate_options();
    if let Some(len) = length {
        options.length = len;
    }
    options.exclude_ambiguous |= exclude_ambiguous;
    options.charset = charset;

    let passwords = generate_many(count, &options)?;

    if let [password] = passwords.as_slice() {
        println!("{password}");
        output::print_strength(&score(password));
        return Ok(());
    }

    for (i, password) in passwords.iter().enumerate() {
        let report = score(password);
        println!(
            "{:>3}. {password}  {}",
            i + 1,
            output::styled_band(report.band)
        );
    }

    Ok(())
}
