//! Heuristic password strength scoring.
//!
//! Each signal adds or subtracts a fixed amount independently, so the
//! final score does not depend on evaluation order; only the order of
//! the suggestions does.

use std::collections::HashSet;
use std::fmt;

use super::generator::SYMBOLS;

/// Passwords that are penalised on an exact, case-insensitive match.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "password123",
    "admin",
    "qwerty",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
];

/// Runs whose 3-character windows count as a sequence.
const SEQUENCES: &[&str] = &[
    "123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "qwertyuiop",
    "987654321",
    "zyxwvutsrqponmlkjihgfedcba",
];

/// Qualitative strength band derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthBand {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthBand {
    fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::VeryStrong,
            60..=79 => Self::Strong,
            40..=59 => Self::Medium,
            20..=39 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `score`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    /// 0..=100
    pub score: u8,
    pub band: StrengthBand,
    /// Human-readable hints, one per failed check.
    pub suggestions: Vec<String>,
}

/// Score a candidate password.
pub fn score(password: &str) -> StrengthReport {
    let mut points: i32 = 0;
    let mut suggestions = Vec::new();
    let mut suggest = |s: &str| suggestions.push(s.to_string());

    let length = password.chars().count();
    if length >= 12 {
        points += 25;
    } else if length >= 8 {
        points += 15;
        suggest("increase length to 12+ characters");
    } else {
        points += 5;
        suggest("too short (minimum 8 characters)");
    }

    let checks: [(bool, i32, &str); 4] = [
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            15,
            "add lowercase letters",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            15,
            "add uppercase letters",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            15,
            "add digits",
        ),
        (
            password.chars().any(|c| SYMBOLS.contains(c)),
            20,
            "add special characters",
        ),
    ];
    for (passed, reward, hint) in checks {
        if passed {
            points += reward;
        } else {
            suggest(hint);
        }
    }

    // unique / length >= 0.7, kept in integers.
    let unique = password.chars().collect::<HashSet<_>>().len();
    if unique * 10 >= length * 7 {
        points += 10;
    } else {
        suggest("avoid repeated characters");
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        points = (points - 50).max(0);
        suggest("avoid common passwords");
    }

    if has_sequence(&lowered) {
        points = (points - 20).max(0);
        suggest("avoid sequences (123, abc, qwe...)");
    }

    let score = u8::try_from(points.clamp(0, 100)).unwrap_or(0);
    StrengthReport {
        score,
        band: StrengthBand::from_score(score),
        suggestions,
    }
}

/// True if `lowered` contains any 3-character window of a known run.
fn has_sequence(lowered: &str) -> bool {
    SEQUENCES.iter().any(|seq| {
        seq.as_bytes()
            .windows(3)
            .filter_map(|w| std::str::from_utf8(w).ok())
            .any(|window| lowered.contains(window))
    })
}
