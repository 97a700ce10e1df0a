//! Setlist CLI library.
//!
//! Offline tooling for rule corpora: query recommendations, inspect and
//! validate a corpus, and convert it between storage formats.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};
