//! Random password generation.
//!
//! A password gets one character from every selected category, then is
//! filled from the combined pool, then shuffled so the guaranteed
//! characters are not predictably at the front.  All randomness comes
//! from the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, TryRngCore};

use crate::errors::{PassVaultError, Result};

/// Shortest password `generate` will produce.
pub const MIN_LENGTH: usize = 4;

/// Default password length.
pub const DEFAULT_LENGTH: usize = 12;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Punctuation used by the generator and recognised by the strength scorer.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters dropped when `exclude_ambiguous` is set.
const AMBIGUOUS: &[char] = &['l', 'o', 'I', 'O', '0', '1'];

/// Which character categories a password may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl Charset {
    /// The selected categories, each as its own character list.
    fn categories(&self, exclude_ambiguous: bool) -> Vec<Vec<char>> {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(selected, _)| *selected)
        .map(|(_, chars)| {
            chars
                .chars()
                .filter(|c| !(exclude_ambiguous && AMBIGUOUS.contains(c)))
                .collect::<Vec<char>>()
        })
        .filter(|chars| !chars.is_empty())
        .collect()
    }
}

/// Parameters for `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub length: usize,
    pub charset: Charset,
    pub exclude_ambiguous: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            charset: Charset::default(),
            exclude_ambiguous: false,
        }
    }
}

/// Generate one password.
///
/// Fails with `InvalidRequest` if `length` is below `MIN_LENGTH` or no
/// category is selected.
pub fn generate(options: &GenerateOptions) -> Result<String> {
    if options.length < MIN_LENGTH {
        return Err(PassVaultError::InvalidRequest(format!(
            "password length must be at least {MIN_LENGTH} (got {})",
            options.length
        )));
    }

    let categories = options.charset.categories(options.exclude_ambiguous);
    if categories.is_empty() {
        return Err(PassVaultError::InvalidRequest(
            "at least one character category must be selected".into(),
        ));
    }
    let pool: Vec<char> = categories.iter().flatten().copied().collect();

    let mut rng = OsRng.unwrap_err();
    let mut password: Vec<char> = Vec::with_capacity(options.length);

    // One guaranteed character per selected category.
    for chars in &categories {
        password.push(chars[rng.random_range(0..chars.len())]);
    }

    while password.len() < options.length {
        password.push(pool[rng.random_range(0..pool.len())]);
    }

    password.shuffle(&mut rng);
    Ok(password.into_iter().collect())
}

/// Generate `count` independent passwords.  Duplicates are possible in
/// principle; nothing checks for them.
pub fn generate_many(count: usize, options: &GenerateOptions) -> Result<Vec<String>> {
    (0..count).map(|_| generate(options)).collect()
}
