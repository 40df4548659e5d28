//! Password utilities that do not touch the vault.
//!
//! - Constrained random generation (`generator`)
//! - Heuristic strength scoring (`strength`)

pub mod generator;
pub mod strength;

pub use generator::{generate, generate_many, Charset, GenerateOptions};
pub use strength::{score, StrengthBand, StrengthReport};
