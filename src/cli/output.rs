//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::password::{StrengthBand, StrengthReport};
use crate::vault::VaultEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Band name colored by how good it is.
pub fn styled_band(band: StrengthBand) -> String {
    let text = style(band.as_str()).bold();
    match band {
        StrengthBand::VeryStrong | StrengthBand::Strong => text.green().to_string(),
        StrengthBand::Medium => text.yellow().to_string(),
        StrengthBand::Weak | StrengthBand::VeryWeak => text.red().to_string(),
    }
}

/// Print a strength report with its suggestions.
pub fn print_strength(report: &StrengthReport) {
    println!(
        "Strength: {} ({}/100)",
        styled_band(report.band),
        report.score
    );
    if !report.suggestions.is_empty() {
        println!("Suggestions:");
        for s in &report.suggestions {
            println!("  \u{2022} {s}");
        }
    }
}

/// Print one entry.  An undecryptable secret shows as the sentinel.
pub fn print_entry(entry: &VaultEntry) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Service", entry.service.as_str()]);
    table.add_row(vec!["Username", entry.username.as_str()]);
    table.add_row(vec!["Password", entry.secret.as_display()]);
    if !entry.notes.is_empty() {
        table.add_row(vec!["Notes", entry.notes.as_str()]);
    }
    table.add_row(vec![
        "Created".to_string(),
        entry.created_at.format("%Y-%m-%d").to_string(),
    ]);
    table.add_row(vec![
        "Updated".to_string(),
        entry.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    println!("{table}");
}

/// Print a numbered table of service names.
pub fn print_services_table(services: &[String]) {
    if services.is_empty() {
        info("No passwords saved yet.");
        tip("Run `passvault set <SERVICE>` to add your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Service"]);

    for (i, service) in services.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), service.clone()]);
    }

    println!("{table}");
}
