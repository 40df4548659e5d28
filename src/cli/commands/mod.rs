//! One module per subcommand.  Each exposes an `execute` function.

pub mod check;
pub mod delete;
pub mod export;
pub mod generate;
pub mod get;
pub mod list;
pub mod rekey;
pub mod set;
